//! Data models

pub mod record;
pub mod dataset;
pub mod selection;
pub mod summary;

pub use record::*;
pub use dataset::*;
pub use selection::*;
pub use summary::*;
