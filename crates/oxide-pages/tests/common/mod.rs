#![allow(dead_code)]

use std::fs;
use std::path::Path;

use oxide_pages::{PageRouter, Route, RouteMatch};
use tempfile::TempDir;

pub fn route(pattern: &str) -> Route {
    Route::parse(pattern).unwrap_or_else(|e| panic!("Failed to parse: {pattern}\nError: {e:?}"))
}

pub fn router(patterns: &[&str]) -> PageRouter {
    PageRouter::from_routes(patterns.iter().map(|p| route(p)))
        .unwrap_or_else(|e| panic!("Failed to build router for {patterns:?}\nError: {e}"))
}

pub fn resolve(router: &PageRouter, path: &str) -> RouteMatch {
    router
        .resolve(path)
        .unwrap_or_else(|| panic!("Expected a match for: {path}"))
}

pub fn bindings(m: &RouteMatch) -> Vec<(String, String)> {
    m.params.clone().into_vec()
}

pub fn pair(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

/// Creates a temporary pages directory containing empty files at `paths`.
pub fn pages_dir(paths: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for path in paths {
        touch(dir.path(), path);
    }
    dir
}

pub fn touch(root: &Path, path: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).expect("Failed to create page directory");
    }
    fs::write(&full, "").expect("Failed to write page file");
}
