#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Label record repository over SQLite: migrations, lookups, and bulk import.

pub mod bulk;
pub mod error;
pub mod model;
pub mod store;

pub use bulk::{BulkEntry, normalize_code, parse_bulk_lines};
pub use error::{DataError, Result as DataResult};
pub use model::{ImportReport, LabelRecord};
pub use store::{LabelStore, name_key};
