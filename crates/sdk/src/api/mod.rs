//! API endpoint groups.

pub mod images;
pub mod search;

pub use images::{Hit, ImagesApi, SearchResponse};
pub use search::{
    Category, Color, ImageType, Language, Order, Orientation, SearchParams, MAX_PER_PAGE,
    MAX_QUERY_CHARS, MIN_PER_PAGE,
};
