//! # oxide-pages
//!
//! File-system based page routing.
//!
//! The layout of a pages directory is the URL space: every page file
//! becomes a route pattern, and the patterns are organized into a tree that
//! resolves request paths to the most specific route.
//!
//! This crate provides:
//! - Page discovery and file path to pattern conversion
//! - Route patterns with static, dynamic (`[name]`) and catch-all
//!   (`[...name]`) segments
//! - A route tree with static > dynamic > catch-all precedence and
//!   backtracking across levels
//! - A registry for exact pattern lookups
//! - Construction errors reported all at once
//!
//! ## Quick Start
//!
//! ```no_run
//! use oxide_pages::{PageRouter, PagesConfig};
//!
//! let router = PageRouter::from_config(&PagesConfig::new("pages")).unwrap();
//!
//! if let Some(m) = router.resolve("/blog/hello-world") {
//!     println!("{} {:?}", m.pattern(), m.params.get("slug"));
//! }
//! ```
//!
//! ## Pattern Syntax
//!
//! | page file             | pattern             | matches             |
//! |-----------------------|---------------------|---------------------|
//! | `index.rs`            | `/`                 | `/`                 |
//! | `blog/archive.rs`     | `/blog/archive`     | `/blog/archive`     |
//! | `blog/[slug].rs`      | `/blog/[slug]`      | `/blog/hello-world` |
//! | `users/[...parts].rs` | `/users/[...parts]` | `/users/a/b/c`      |
//!
//! A catch-all needs at least one segment: `/users/[...parts]` does not
//! match `/users`.
//!
//! ## Building From Routes
//!
//! ```
//! use oxide_pages::{PageRouter, Route};
//!
//! let router = PageRouter::from_routes([
//!     Route::parse("/users/[...parts]").unwrap(),
//!     Route::parse("/users/me").unwrap(),
//! ])
//! .unwrap();
//!
//! let m = router.resolve("/users/a/b/c").unwrap();
//! assert_eq!(m.params.get("parts"), Some("a/b/c"));
//! assert_eq!(router.resolve("/users/me").unwrap().pattern(), "/users/me");
//! ```

mod config;
mod discovery;
mod error;
mod matcher;
mod pattern;
mod registry;
mod router;
mod tree;

pub use config::PagesConfig;
pub use discovery::{discover, to_pattern, PageFile};
pub use error::{Result, RouteError};
pub use matcher::{Params, RouteMatch};
pub use pattern::{extract_parameters, Route, Segment};
pub use registry::Registry;
pub use router::PageRouter;
pub use tree::RouteTree;
