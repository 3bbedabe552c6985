//! Field-selection path validation.
//!
//! A selection path may nest at most one level: `fields.title` is accepted,
//! `fields.title.en` is not. Empty segments are ignored when counting, so
//! `fields..title` still counts as two segments.

use tracing::warn;

use crate::error::{QueryError, QueryResult};

/// The system metadata field, always part of a selection.
pub const SYS_FIELD: &str = "sys";

/// Maximum number of non-empty `.`-separated segments in a selection path.
const MAX_SELECTION_DEPTH: usize = 2;

/// Returns true if `path` nests at most one level deep.
pub fn is_valid_selection(path: &str) -> bool {
    path.split('.').filter(|segment| !segment.is_empty()).count() <= MAX_SELECTION_DEPTH
}

/// Validates every path, failing on the first invalid one.
pub fn validate_selections<S: AsRef<str>>(paths: &[S]) -> QueryResult<()> {
    for path in paths {
        let path = path.as_ref();
        if !is_valid_selection(path) {
            warn!(field_key_path = %path, "Rejecting selection path");
            return Err(QueryError::InvalidSelection {
                field_key_path: path.to_string(),
            });
        }
    }
    Ok(())
}

/// Returns `paths` with [`SYS_FIELD`] appended unless already present.
pub fn add_sys_if_needed<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut selections: Vec<String> = paths.iter().map(|p| p.as_ref().to_string()).collect();
    if !selections.iter().any(|p| p == SYS_FIELD) {
        selections.push(SYS_FIELD.to_string());
    }
    selections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_paths() {
        assert!(is_valid_selection("sys"));
        assert!(is_valid_selection("fields"));
        assert!(is_valid_selection("fields.title"));
        assert!(is_valid_selection("sys.id"));
        assert!(is_valid_selection("fields..title"));
    }

    #[test]
    fn test_invalid_paths() {
        assert!(!is_valid_selection("fields.a.b"));
        assert!(!is_valid_selection("fields.title.en-US"));
        assert!(!is_valid_selection("a.b.c.d"));
    }

    #[test]
    fn test_validate_selections_reports_first_invalid() {
        let paths = ["fields.title", "fields.a.b", "fields.x.y"];
        assert_eq!(
            validate_selections(&paths),
            Err(QueryError::InvalidSelection {
                field_key_path: "fields.a.b".to_string()
            })
        );
        assert!(validate_selections(&["fields.title", "sys"]).is_ok());
    }

    #[test]
    fn test_add_sys_if_needed() {
        assert_eq!(add_sys_if_needed(&["fields.title"]), vec!["fields.title", "sys"]);
        assert_eq!(
            add_sys_if_needed(&["sys", "fields.title"]),
            vec!["sys", "fields.title"]
        );
        assert_eq!(add_sys_if_needed::<&str>(&[]), vec!["sys"]);
    }

    #[test]
    fn test_sys_subfield_does_not_count_as_sys() {
        assert_eq!(add_sys_if_needed(&["sys.id"]), vec!["sys.id", "sys"]);
    }
}
