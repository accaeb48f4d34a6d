//! Filter-and-aggregate pipeline
//!
//! ```text
//! Dataset ──view()──▶ filter ──▶ summarize ──▶ report (KPIs, narrative)
//!                        │
//!                        └─────▶ search ──▶ table page / export
//! ```
//!
//! Every stage is a pure function of its inputs and is rerun on each
//! request; nothing here holds state between calls.

pub mod filter;
pub mod aggregate;
pub mod search;
pub mod report;

pub use filter::filter;
pub use aggregate::summarize;
pub use search::search;
pub use report::{kpi_tiles, narrative, KpiTile, Narrative, TablePage};
