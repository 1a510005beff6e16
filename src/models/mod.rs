// Model exports
pub mod domain;
pub mod query;
pub mod requests;
pub mod responses;

pub use domain::{Catalog, CatalogMeta, GeoPoint, Restaurant};
pub use query::{BrowseQuery, FavoriteKeyFn, PriceRange, PriceRangeError, SortKey};
pub use requests::{BrowseRequest, OneOrMany};
pub use responses::{BrowseResponse, FacetCount, FacetsResponse};
