use serde::{Deserialize, Serialize};
use crate::models::domain::Restaurant;

/// Response for a browse invocation
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResponse<'a> {
    pub results: Vec<&'a Restaurant>,
    pub total_results: usize,
    pub total_candidates: usize,
    pub sort: String,
}

/// One selectable facet value with the number of records carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Facet options offered by the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub cuisines: Vec<FacetCount>,
    pub districts: Vec<FacetCount>,
}
