//! Integration tests for the query builder.
//!
//! Covers the observable parameter map:
//! - Filter encodings for every operation
//! - Field selection with implicit `sys`
//! - Selection limit and path validation
//! - Content type and locale injection
//! - Immutability and order independence of chained calls

use std::collections::HashMap;
use std::thread;

use delivery_query::{ContentModel, Query, QueryConfig, QueryError, QueryOperation};

struct Cat;

impl ContentModel for Cat {
    fn content_type_id() -> Option<&'static str> {
        Some("cat")
    }
}

struct Space;

impl ContentModel for Space {}

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_equals_filter() {
    let params = Query::filter_on::<Space>("fields.title", QueryOperation::Equals("cat".into()))
        .final_parameters();
    assert_eq!(params, map(&[("fields.title", "cat"), ("locale", "en-US")]));
}

#[test]
fn test_all_of_filter() {
    let query = Query::new().filter("fields.tags", QueryOperation::has_all(["a", "b"]));
    assert_eq!(query.parameters(), &map(&[("fields.tags[all]", "a,b")]));
}

#[test]
fn test_exists_filter() {
    let query = Query::new().filter("fields.title", QueryOperation::Exists(true));
    assert_eq!(query.parameters(), &map(&[("fields.title[exists]", "true")]));
}

#[test]
fn test_select_on_model() {
    let params = Query::select_on::<Cat, _>(&["fields.title"])
        .unwrap()
        .final_parameters();
    assert_eq!(
        params,
        map(&[
            ("select", "fields.title,sys"),
            ("content_type", "cat"),
            ("locale", "en-US"),
        ])
    );
}

#[test]
fn test_sys_never_duplicated() {
    let query = Query::new().select(&["sys", "fields.title"]).unwrap();
    assert_eq!(query.final_parameters()["select"], "sys,fields.title");
}

#[test]
fn test_selection_limit_boundary() {
    let paths: Vec<String> = (0..100).map(|i| format!("fields.f{i}")).collect();

    let err = Query::for_model::<Cat>().select(&paths).unwrap_err();
    assert!(matches!(err, QueryError::SelectionLimitExceeded { count: 100, .. }));

    let query = Query::for_model::<Cat>().select(&paths[..99]).unwrap();
    let select = &query.final_parameters()["select"];
    assert_eq!(select.split(',').count(), 100);
    assert!(select.ends_with(",sys"));
}

#[test]
fn test_invalid_selection_names_path() {
    let err = Query::new()
        .select(&["fields.title", "fields.image.url"])
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid selection: fields.image.url");
}

#[test]
fn test_chaining_order_independent() {
    let base = Query::for_model::<Cat>();
    let op = QueryOperation::DoesNotEqual("Nyan".into());

    let a = base
        .filter("fields.name", op.clone())
        .select(&["fields.name"])
        .unwrap();
    let b = base
        .select(&["fields.name"])
        .unwrap()
        .filter("fields.name", op);

    assert_eq!(a.final_parameters(), b.final_parameters());
}

#[test]
fn test_immutability() {
    let q1 = Query::for_model::<Cat>().filter("fields.color", QueryOperation::Equals("gray".into()));
    let before = q1.final_parameters();

    let q2 = q1.filter("fields.lives", QueryOperation::Exists(true));
    let q3 = q1.select(&["fields.color"]).unwrap();

    assert_eq!(q1.final_parameters(), before);
    assert!(q2.parameters().contains_key("fields.lives[exists]"));
    assert!(!q3.parameters().contains_key("fields.lives[exists]"));
}

#[test]
fn test_concurrent_derivations_from_shared_base() {
    let base = Query::for_model::<Cat>().filter("fields.color", QueryOperation::Equals("gray".into()));

    let results: Vec<HashMap<String, String>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let base = &base;
                s.spawn(move || {
                    base.filter("fields.lives", QueryOperation::Equals(i.to_string()))
                        .final_parameters()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, params) in results.iter().enumerate() {
        assert_eq!(params["fields.lives"], i.to_string());
        assert_eq!(params.len(), 4);
    }
    assert!(!base.parameters().contains_key("fields.lives"));
}

#[test]
fn test_locale_and_content_type_always_injected() {
    let params = Query::for_model::<Cat>().final_parameters();
    assert_eq!(params["locale"], "en-US");
    assert_eq!(params["content_type"], "cat");

    let params = Query::for_model::<Space>().final_parameters();
    assert_eq!(params["locale"], "en-US");
    assert!(!params.contains_key("content_type"));
}

#[test]
fn test_configured_default_locale() {
    let config = QueryConfig {
        default_locale: "tlh".to_string(),
        ..QueryConfig::for_testing()
    };
    let query = Query::with_config(config, Some("cat".to_string()))
        .filter("fields.name", QueryOperation::Equals("Happy Cat".into()));
    assert_eq!(query.final_parameters()["locale"], "tlh");
}

#[test]
fn test_init_logging_only_once() {
    assert!(delivery_query::init_logging("debug").is_ok());
    assert!(delivery_query::init_logging("debug").is_err());
}
