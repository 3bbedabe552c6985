//! Query builder configuration.
//!
//! Configuration can be built programmatically or read from the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DELIVERY_DEFAULT_LOCALE` | en-US | Locale of a fresh query |
//! | `DELIVERY_SELECTION_LIMIT` | 100 | `select` fails once the path count reaches this |
//! | `DELIVERY_HONOR_SELECT_LOCALE` | true | Store the locale passed to `select_with_locale` |
//! | `DELIVERY_STRICT_FIELD_PATHS` | false | Require `fields.`/`sys.` prefixes in `try_filter` |
//! | `DELIVERY_LOG_LEVEL` | info | Log level for [`crate::init_logging`] |
//!
//! # Example
//!
//! ```rust
//! use delivery_query::QueryConfig;
//!
//! let config = QueryConfig {
//!     default_locale: "de-DE".to_string(),
//!     strict_field_paths: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! // Or read from the environment and use it for logging too
//! let config = QueryConfig::from_env();
//! delivery_query::init_logging(&config.log_level).ok();
//! ```

use clap::Parser;

/// Default locale applied to every new query.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Default upper bound (exclusive) on paths per `select` call.
pub const DEFAULT_SELECTION_LIMIT: usize = 100;

/// Configuration for the query builder.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "delivery-query")]
#[command(about = "Content delivery query builder")]
pub struct QueryConfig {
    /// Locale applied to new queries.
    #[arg(long, env = "DELIVERY_DEFAULT_LOCALE", default_value = DEFAULT_LOCALE)]
    pub default_locale: String,

    /// `select` fails when given this many paths or more.
    #[arg(long, env = "DELIVERY_SELECTION_LIMIT", default_value_t = DEFAULT_SELECTION_LIMIT)]
    pub selection_limit: usize,

    /// Store the locale passed to `select_with_locale`.
    ///
    /// When false, the query falls back to `default_locale` instead. This
    /// matches the fixed `en-US` behavior only while `default_locale` is
    /// left at `en-US`.
    #[arg(long, env = "DELIVERY_HONOR_SELECT_LOCALE", default_value = "true")]
    pub honor_select_locale: bool,

    /// Require filter field paths to start with `fields.` or `sys.`.
    #[arg(long, env = "DELIVERY_STRICT_FIELD_PATHS", default_value = "false")]
    pub strict_field_paths: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "DELIVERY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            selection_limit: DEFAULT_SELECTION_LIMIT,
            honor_select_locale: true,
            strict_field_paths: false,
            log_level: "info".to_string(),
        }
    }
}

impl QueryConfig {
    /// Creates a configuration from environment variables.
    ///
    /// Process arguments are ignored. Falls back to defaults when a variable
    /// fails to parse.
    pub fn from_env() -> Self {
        Self::try_parse_from([env!("CARGO_PKG_NAME")]).unwrap_or_default()
    }

    /// Creates a configuration suitable for tests.
    pub fn for_testing() -> Self {
        Self::default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.selection_limit == 0 {
            errors.push("Selection limit cannot be 0".to_string());
        }

        if self.default_locale.trim().is_empty() {
            errors.push("Default locale cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
