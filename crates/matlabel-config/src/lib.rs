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

//! File and environment backed configuration for label printing.
//!
//! Layout: `model.rs` (typed config sections), `loader.rs` (file + env
//! merging), `validate.rs` (validation and conversion into layout types),
//! `defaults.rs` (built-in values).

mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    ENV_CONFIG_PATH, ENV_DATABASE_URL, ENV_HOST_PAPER, ENV_HOST_SCALE, ENV_LOG_FORMAT,
    ENV_LOG_LEVEL, apply_env_overrides, load, load_with_env, read_file,
};
pub use model::{
    AppConfig, DatabaseConfig, HostConfig, LabelConfig, TelemetryConfig, TypographyConfig,
};
