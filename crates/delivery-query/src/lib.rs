//! # delivery-query - Query Builder for a Content Delivery API
//!
//! This crate builds the query parameters of a read-only content delivery
//! request. Callers express filters over named fields and a field selection;
//! the builder validates them and produces a flat map of parameter names to
//! values for the HTTP transport. Transport, response decoding and caching
//! live elsewhere.
//!
//! ## Quick Start
//!
//! ```rust
//! use delivery_query::{ContentModel, Query, QueryOperation};
//!
//! struct Cat;
//!
//! impl ContentModel for Cat {
//!     fn content_type_id() -> Option<&'static str> {
//!         Some("cat")
//!     }
//! }
//!
//! let query = Query::filter_on::<Cat>("fields.likes", QueryOperation::includes(["lasagna"]))
//!     .select(&["fields.name", "fields.likes"])?;
//!
//! assert_eq!(
//!     query.to_query_string(),
//!     "content_type=cat&fields.likes%5Bin%5D=lasagna&locale=en-US&select=fields.name%2Cfields.likes%2Csys"
//! );
//! # Ok::<(), delivery_query::QueryError>(())
//! ```
//!
//! ## Produced Parameters
//!
//! | Key | Example | Meaning |
//! |-----|---------|---------|
//! | `content_type` | `content_type=cat` | present when the model names a content type |
//! | `locale` | `locale=en-US` | always present |
//! | `select` | `select=fields.title,sys` | selected paths, `sys` always included |
//! | `<field>` | `fields.title=cat` | equality |
//! | `<field>[ne]` | `fields.title[ne]=cat` | inequality |
//! | `<field>[all]` | `fields.tags[all]=a,b` | contains all |
//! | `<field>[in]` | `fields.tags[in]=a,b` | contains any |
//! | `<field>[nin]` | `fields.tags[nin]=a,b` | contains none |
//! | `<field>[exists]` | `fields.title[exists]=true` | presence |
//!
//! ## Modules
//!
//! - [`operation`] - Filter operations and their wire encoding
//! - [`query`] - The immutable query builder
//! - [`selection`] - Selection path validation
//! - [`content_model`] - Content type capability of models
//! - [`config`] - Builder configuration with environment overrides
//! - [`error`] - Error types

pub mod config;
pub mod content_model;
pub mod error;
pub mod operation;
pub mod query;
pub mod selection;

pub use config::{DEFAULT_LOCALE, DEFAULT_SELECTION_LIMIT, QueryConfig};
pub use content_model::ContentModel;
pub use error::{QueryError, QueryResult};
pub use operation::{OperationKind, QueryOperation};
pub use query::Query;

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("delivery_query={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
}
