//! Tests for route tree construction errors.

mod common;
use common::*;

use oxide_pages::{PageRouter, Route, RouteError, RouteTree};

#[test]
fn conflicting_dynamic_names_are_rejected() {
    let err = PageRouter::from_routes([route("/blog/[slug]"), route("/blog/[id]")]).unwrap_err();
    match err {
        RouteError::ConstructionConflict {
            pattern,
            existing,
            requested,
            ..
        } => {
            assert_eq!(pattern, "/blog/[id]");
            assert_eq!(existing, "slug");
            assert_eq!(requested, "id");
        }
        other => panic!("Expected conflict, got {other:?}"),
    }
}

#[test]
fn same_name_under_shared_prefix_is_fine() {
    let r = router(&["/blog/[slug]", "/blog/[slug]/comments", "/blog/[slug]/[...rest]"]);
    assert_eq!(r.len(), 3);
    assert_eq!(
        resolve(&r, "/blog/x/comments").pattern(),
        "/blog/[slug]/comments"
    );
}

#[test]
fn inserting_twice_is_a_duplicate_and_changes_nothing() {
    let mut tree = RouteTree::new();
    tree.insert(route("/blog/[slug]")).unwrap();
    tree.insert(route("/about")).unwrap();
    let nodes = tree.node_count();

    let err = tree.insert(route("/blog/[slug]")).unwrap_err();
    assert!(matches!(err, RouteError::DuplicateRoute { .. }));
    assert_eq!(tree.node_count(), nodes);
    assert_eq!(tree.find("/about").unwrap().pattern(), "/about");
    assert_eq!(tree.find("/blog/x").unwrap().pattern(), "/blog/[slug]");
}

#[test]
fn all_errors_are_reported_together() {
    let err = PageRouter::from_routes([
        route("/a/[x]"),
        route("/a/[y]"),
        route("/b/[...p]"),
        route("/b/[...q]"),
        route("/c"),
        route("/c"),
        route("/d"),
    ])
    .unwrap_err();

    let errors = err.into_vec();
    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors
            .iter()
            .filter(|e| matches!(e, RouteError::ConstructionConflict { .. }))
            .count(),
        2
    );
}

#[test]
fn valid_routes_survive_a_failed_build_of_others() {
    let mut r = PageRouter::new();
    r.add(route("/a/[x]")).unwrap();
    assert!(r.add(route("/a/[y]")).is_err());
    r.add(route("/a/[x]/edit")).unwrap();
    assert_eq!(resolve(&r, "/a/1/edit").params.get("x"), Some("1"));
}

#[test]
fn malformed_patterns_are_rejected() {
    for pattern in ["", "blog", "/blog/", "/a//b", "/[", "/[]", "/[...a]/b", "/[a]/[a]"] {
        assert!(
            matches!(
                oxide_pages::Route::parse(pattern),
                Err(RouteError::MalformedPattern { .. })
            ),
            "expected {pattern:?} to be rejected"
        );
    }
}

#[test]
fn registry_lookup_is_independent_of_matching() {
    let r = router(&["/blog/[slug]"]);
    assert!(r.registry().contains("/blog/[slug]"));
    assert!(r.route("/blog/hello").is_none());
    assert!(r.resolve("/blog/hello").is_some());
}

#[test]
fn routes_loaded_from_json_are_validated() {
    let routes: Vec<Route> =
        serde_json::from_str(r#"["/", "/blog/[slug]", "/files/[...path]"]"#).unwrap();
    let r = PageRouter::from_routes(routes).unwrap();
    assert_eq!(resolve(&r, "/files/a/b").params.get("path"), Some("a/b"));

    for json in [
        r#"["blog//x["]"#,
        r#"["/files/[...path]/edit"]"#,
        r#"[{"pattern": "/u/[...p]", "parameters": [], "catch_all": null}]"#,
    ] {
        assert!(
            serde_json::from_str::<Vec<Route>>(json).is_err(),
            "Expected {json} to be rejected"
        );
    }
}
