//! Document submission entities.

pub mod doc_type;
pub mod filter;
pub mod model;
pub mod status;

pub use doc_type::DocumentType;
pub use filter::{DocumentFilter, day_bounds, sort_newest_first};
pub use model::{DocumentFiles, DocumentRecord};
pub use status::DocumentStatus;
