//! Immutable query builder.
//!
//! A [`Query`] accumulates filter and selection parameters. Every builder
//! call returns a new value and leaves the receiver untouched, so a base
//! query can be shared and extended independently by many callers.
//!
//! ```rust
//! use delivery_query::{ContentModel, Query, QueryOperation};
//!
//! struct Cat;
//! impl ContentModel for Cat {
//!     fn content_type_id() -> Option<&'static str> {
//!         Some("cat")
//!     }
//! }
//!
//! let query = Query::for_model::<Cat>()
//!     .filter("fields.color", QueryOperation::Equals("gray".into()))
//!     .select(&["fields.name"])
//!     .unwrap();
//!
//! let params = query.final_parameters();
//! assert_eq!(params["fields.color"], "gray");
//! assert_eq!(params["select"], "fields.name,sys");
//! assert_eq!(params["content_type"], "cat");
//! assert_eq!(params["locale"], "en-US");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::QueryConfig;
use crate::content_model::ContentModel;
use crate::error::{QueryError, QueryResult};
use crate::operation::QueryOperation;
use crate::selection::{add_sys_if_needed, validate_selections};

/// Parameter key carrying the resolved content type.
pub const CONTENT_TYPE_PARAM: &str = "content_type";

/// Parameter key carrying the locale.
pub const LOCALE_PARAM: &str = "locale";

/// Parameter key carrying the comma-joined selection.
pub const SELECT_PARAM: &str = "select";

/// Prefixes accepted for filter field paths in strict mode.
const FIELD_PATH_PREFIXES: &[&str] = &["fields.", "sys."];

/// An immutable set of query parameters bound to a content type.
#[derive(Debug, Clone)]
pub struct Query {
    content_type_id: Option<String>,
    locale: String,
    parameters: Arc<HashMap<String, String>>,
    /// Operations applied so far, by field path.
    filters: Arc<Vec<(String, QueryOperation)>>,
    config: Arc<QueryConfig>,
}

/// Two queries are equal when they send the same request.
///
/// The order in which filters were applied and the configuration used to
/// build them are not compared.
impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.content_type_id == other.content_type_id
            && self.locale == other.locale
            && self.parameters == other.parameters
    }
}

impl Eq for Query {}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// Creates an empty query with no content type.
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default(), None)
    }

    /// Creates an empty query bound to `M`'s content type.
    pub fn for_model<M: ContentModel>() -> Self {
        Self::with_config(
            QueryConfig::default(),
            M::content_type_id().map(str::to_string),
        )
    }

    /// Creates an empty query bound to an explicit content type.
    pub fn for_content_type(content_type_id: impl Into<String>) -> Self {
        Self::with_config(QueryConfig::default(), Some(content_type_id.into()))
    }

    /// Creates an empty query with the given configuration and content type.
    pub fn with_config(config: QueryConfig, content_type_id: Option<String>) -> Self {
        Self {
            content_type_id,
            locale: config.default_locale.clone(),
            parameters: Arc::new(HashMap::new()),
            filters: Arc::new(Vec::new()),
            config: Arc::new(config),
        }
    }

    /// Starts a query on `M` with a single filter.
    pub fn filter_on<M: ContentModel>(field_path: &str, operation: QueryOperation) -> Self {
        Self::for_model::<M>().filter(field_path, operation)
    }

    /// Starts a query on `M` with a field selection.
    pub fn select_on<M: ContentModel, S: AsRef<str>>(field_paths: &[S]) -> QueryResult<Self> {
        Self::for_model::<M>().select(field_paths)
    }

    /// Returns the resolved content type identifier.
    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type_id.as_deref()
    }

    /// Returns the query's locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the accumulated parameters, without `content_type` or `locale`.
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    /// Returns the configuration this query was built with.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Adds a filter on `field_path`.
    ///
    /// The field path is not validated and the operation is not checked
    /// against earlier filters; see [`Self::try_filter`] for that. A later
    /// filter with the same parameter key replaces the earlier value.
    pub fn filter(&self, field_path: &str, operation: QueryOperation) -> Self {
        let name = operation.parameter_name(field_path);
        let value = operation.values();

        debug!(field = %field_path, parameter = %name, value = %value, "Adding filter");

        let mut filters = (*self.filters).clone();
        filters.push((field_path.to_string(), operation));

        let mut derived = self.with_parameter(name, value, self.locale.clone());
        derived.filters = Arc::new(filters);
        derived
    }

    /// Adds a filter on `field_path` after validating it.
    ///
    /// Fails with [`QueryError::InvalidFieldPath`] when strict field paths
    /// are configured and the path has no `fields.`/`sys.` prefix, and with
    /// [`QueryError::UnsupportedCombination`] when the field already carries
    /// an operation that cannot be combined with `operation`.
    pub fn try_filter(&self, field_path: &str, operation: QueryOperation) -> QueryResult<Self> {
        if self.config.strict_field_paths && !is_valid_field_path(field_path) {
            warn!(field = %field_path, "Rejecting filter field path");
            return Err(QueryError::InvalidFieldPath {
                field_path: field_path.to_string(),
            });
        }

        for (_, existing) in self.filters.iter().filter(|(f, _)| f == field_path) {
            if let Err(e) = QueryOperation::validate_combination(existing, &operation) {
                warn!(field = %field_path, error = %e, "Rejecting filter combination");
                return Err(e);
            }
        }

        Ok(self.filter(field_path, operation))
    }

    /// Restricts the returned fields to `field_paths`.
    ///
    /// `sys` is appended unless already listed. Keeps the query's locale.
    pub fn select<S: AsRef<str>>(&self, field_paths: &[S]) -> QueryResult<Self> {
        self.select_paths(field_paths, self.locale.clone())
    }

    /// Restricts the returned fields to `field_paths` and sets the locale.
    ///
    /// When `honor_select_locale` is disabled the locale argument is ignored
    /// and the configured default locale is used instead.
    pub fn select_with_locale<S: AsRef<str>>(
        &self,
        field_paths: &[S],
        locale: &str,
    ) -> QueryResult<Self> {
        let locale = if self.config.honor_select_locale {
            locale.to_string()
        } else {
            self.config.default_locale.clone()
        };
        self.select_paths(field_paths, locale)
    }

    fn select_paths<S: AsRef<str>>(&self, field_paths: &[S], locale: String) -> QueryResult<Self> {
        let limit = self.config.selection_limit;
        if field_paths.len() >= limit {
            warn!(count = field_paths.len(), limit, "Selection limit exceeded");
            return Err(QueryError::SelectionLimitExceeded {
                count: field_paths.len(),
                limit,
            });
        }

        validate_selections(field_paths)?;

        let selections = add_sys_if_needed(field_paths).join(",");
        debug!(selections = %selections, locale = %locale, "Adding selection");

        Ok(self.with_parameter(SELECT_PARAM.to_string(), selections, locale))
    }

    /// Returns the parameters to send, including `content_type` and `locale`.
    pub fn final_parameters(&self) -> HashMap<String, String> {
        let mut parameters = (*self.parameters).clone();

        if let Some(content_type_id) = &self.content_type_id {
            parameters.insert(CONTENT_TYPE_PARAM.to_string(), content_type_id.clone());
        }
        parameters.insert(LOCALE_PARAM.to_string(), self.locale.clone());

        trace!(count = parameters.len(), "Built final query parameters");
        parameters
    }

    /// Encodes [`Self::final_parameters`] as a URL query string.
    ///
    /// Keys are emitted in sorted order.
    pub fn to_query_string(&self) -> String {
        let sorted: BTreeMap<String, String> = self.final_parameters().into_iter().collect();
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(sorted.iter())
            .finish()
    }

    /// Copies this query with one extra parameter and the given locale.
    fn with_parameter(&self, name: String, value: String, locale: String) -> Self {
        let mut parameters = (*self.parameters).clone();
        parameters.insert(name, value);

        Self {
            content_type_id: self.content_type_id.clone(),
            locale,
            parameters: Arc::new(parameters),
            filters: Arc::clone(&self.filters),
            config: Arc::clone(&self.config),
        }
    }
}

fn is_valid_field_path(field_path: &str) -> bool {
    FIELD_PATH_PREFIXES
        .iter()
        .any(|prefix| field_path.len() > prefix.len() && field_path.starts_with(prefix))
}
