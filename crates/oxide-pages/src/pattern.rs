//! Route patterns and segment classification.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};

/// Matches `[...name]` (group 1) or `[name]` (group 2).
static PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\.\.\.([^\]]+)\]|\[([^\]]+)\]").expect("parameter regex is valid")
});

/// One segment of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, matched exactly.
    Static(&'a str),
    /// A single-segment parameter, `[name]`.
    Dynamic(&'a str),
    /// A trailing multi-segment parameter, `[...name]`.
    CatchAll(&'a str),
}

impl<'a> Segment<'a> {
    /// Classifies a segment by its bracket markers.
    ///
    /// Anything that is not wrapped in brackets is static, including text
    /// with stray brackets; use [`Segment::parse`] to reject those.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_pages::Segment;
    ///
    /// assert_eq!(Segment::classify("about"), Segment::Static("about"));
    /// assert_eq!(Segment::classify("[slug]"), Segment::Dynamic("slug"));
    /// assert_eq!(Segment::classify("[...parts]"), Segment::CatchAll("parts"));
    /// ```
    #[must_use]
    pub fn classify(segment: &'a str) -> Self {
        match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            Some(inner) => inner
                .strip_prefix("...")
                .map_or(Self::Dynamic(inner), Self::CatchAll),
            None => Self::Static(segment),
        }
    }

    /// Classifies a segment of `pattern`, rejecting malformed brackets and
    /// parameter names.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedPattern`] for empty segments,
    /// unbalanced brackets and empty or invalid parameter names.
    pub fn parse(segment: &'a str, pattern: &str) -> Result<Self> {
        if segment.is_empty() {
            return Err(RouteError::malformed(pattern, "empty path segment"));
        }
        let classified = Self::classify(segment);
        match classified {
            Self::Static(text) => {
                if text.contains('[') || text.contains(']') {
                    return Err(RouteError::malformed(
                        pattern,
                        format!("unterminated bracket in segment '{text}'"),
                    ));
                }
            }
            Self::Dynamic(name) | Self::CatchAll(name) => {
                if name.is_empty() {
                    return Err(RouteError::malformed(pattern, "empty parameter name"));
                }
                if name.contains(['[', ']', '/']) {
                    return Err(RouteError::malformed(
                        pattern,
                        format!("invalid parameter name '{name}'"),
                    ));
                }
            }
        }
        Ok(classified)
    }

    /// Returns the bound parameter name, if any.
    #[must_use]
    pub const fn parameter(&self) -> Option<&'a str> {
        match *self {
            Self::Static(_) => None,
            Self::Dynamic(name) | Self::CatchAll(name) => Some(name),
        }
    }
}

/// Splits a normalized pattern or request path into its segments.
///
/// The root `/` has no segments.
pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

/// Extracts parameter names and the catch-all name from a pattern.
///
/// Names are returned in order of appearance; the catch-all name, if any,
/// is included at its position.
///
/// # Example
///
/// ```
/// use oxide_pages::extract_parameters;
///
/// let (params, catch_all) = extract_parameters("/users/[id]/files/[...path]");
/// assert_eq!(params, vec!["id", "path"]);
/// assert_eq!(catch_all.as_deref(), Some("path"));
/// ```
#[must_use]
pub fn extract_parameters(pattern: &str) -> (Vec<String>, Option<String>) {
    let mut parameters = Vec::new();
    let mut catch_all = None;
    for caps in PARAM_REGEX.captures_iter(pattern) {
        if let Some(name) = caps.get(1) {
            parameters.push(name.as_str().to_string());
            catch_all = Some(name.as_str().to_string());
        } else if let Some(name) = caps.get(2) {
            parameters.push(name.as_str().to_string());
        }
    }
    (parameters, catch_all)
}

/// A routable URL pattern such as `/blog/[slug]`.
///
/// A `Route` only exists in validated form: it is built by [`Route::parse`]
/// and serializes as its pattern string, which is parsed again on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route {
    pattern: String,
    parameters: Vec<String>,
    catch_all: Option<String>,
}

impl Route {
    /// Parses and validates a route pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_pages::Route;
    ///
    /// let route = Route::parse("/user/[username]/post/[postId]").unwrap();
    /// assert_eq!(route.parameters(), ["username", "postId"]);
    /// assert!(route.catch_all().is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedPattern`] when the pattern does not
    /// start with `/`, has a trailing slash or an empty segment, contains a
    /// malformed bracket or parameter name, repeats a parameter name, or has
    /// segments after a catch-all.
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(RouteError::malformed(pattern, "pattern must start with '/'"));
        }
        if pattern.len() > 1 && pattern.ends_with('/') {
            return Err(RouteError::malformed(pattern, "trailing slash"));
        }

        let segments = split_segments(pattern)
            .map(|s| Segment::parse(s, pattern))
            .collect::<Result<Vec<_>>>()?;

        let mut seen: Vec<&str> = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            if matches!(segment, Segment::CatchAll(_)) && i + 1 != segments.len() {
                return Err(RouteError::malformed(
                    pattern,
                    "catch-all segment must be last",
                ));
            }
            if let Some(name) = segment.parameter() {
                if seen.contains(&name) {
                    return Err(RouteError::malformed(
                        pattern,
                        format!("parameter '{name}' appears more than once"),
                    ));
                }
                seen.push(name);
            }
        }

        let (parameters, catch_all) = extract_parameters(pattern);
        Ok(Self {
            pattern: pattern.to_string(),
            parameters,
            catch_all,
        })
    }

    /// Returns the normalized pattern, always starting with `/`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parameter names in order of appearance.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the name of the trailing catch-all parameter.
    #[must_use]
    pub fn catch_all(&self) -> Option<&str> {
        self.catch_all.as_deref()
    }

    /// Builds a route without validating it.
    #[cfg(test)]
    pub(crate) fn from_parts(
        pattern: &str,
        parameters: Vec<String>,
        catch_all: Option<String>,
    ) -> Self {
        Self {
            pattern: pattern.to_string(),
            parameters,
            catch_all,
        }
    }

    /// Returns the classified segments of this pattern.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        split_segments(&self.pattern).map(Segment::classify)
    }

    /// Returns whether this pattern has no parameters.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl TryFrom<String> for Route {
    type Error = RouteError;

    fn try_from(pattern: String) -> Result<Self> {
        Self::parse(&pattern)
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(pattern: &str) -> Result<Self> {
        Self::parse(pattern)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.pattern
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_segments() {
        assert_eq!(Segment::classify("blog"), Segment::Static("blog"));
        assert_eq!(Segment::classify("[slug]"), Segment::Dynamic("slug"));
        assert_eq!(Segment::classify("[...parts]"), Segment::CatchAll("parts"));
        assert_eq!(Segment::classify("a[b]"), Segment::Static("a[b]"));
    }

    #[test]
    fn test_extract_parameters() {
        assert_eq!(extract_parameters("/about"), (Vec::new(), None));
        assert_eq!(
            extract_parameters("/blog/[slug]"),
            (vec!["slug".to_string()], None)
        );
        assert_eq!(
            extract_parameters("/users/[...parts]"),
            (vec!["parts".to_string()], Some("parts".to_string()))
        );
    }

    #[test]
    fn test_parse_root() {
        let route = Route::parse("/").unwrap();
        assert_eq!(route.segments().count(), 0);
        assert!(route.is_static());
    }

    #[test]
    fn test_parse_mixed() {
        let route = Route::parse("/shop/[category]/[...rest]").unwrap();
        assert_eq!(route.parameters(), ["category", "rest"]);
        assert_eq!(route.catch_all(), Some("rest"));
        let segments: Vec<_> = route.segments().collect();
        assert_eq!(
            segments,
            vec![
                Segment::Static("shop"),
                Segment::Dynamic("category"),
                Segment::CatchAll("rest"),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for pattern in [
            "about",
            "/about/",
            "/a//b",
            "/blog/[slug",
            "/blog/slug]",
            "/blog/[]",
            "/blog/[...]",
            "/files/[...path]/edit",
            "/[id]/[id]",
            "/x/[a[b]]",
        ] {
            let err = Route::parse(pattern).unwrap_err();
            assert!(
                matches!(err, RouteError::MalformedPattern { .. }),
                "expected malformed pattern for {pattern}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_catch_all_is_last_parameter() {
        let route = Route::parse("/docs/[version]/[...page]").unwrap();
        assert_eq!(
            route.parameters().last().map(String::as_str),
            route.catch_all()
        );
    }

    #[test]
    fn test_serde_goes_through_parse() {
        let route: Route = serde_json::from_str(r#""/blog/[slug]""#).unwrap();
        assert_eq!(route.parameters(), ["slug"]);
        assert_eq!(serde_json::to_string(&route).unwrap(), r#""/blog/[slug]""#);

        let err = serde_json::from_str::<Route>(r#""blog//x[""#).unwrap_err();
        assert!(err.to_string().contains("malformed route pattern"));
        assert!(serde_json::from_str::<Route>(
            r#"{"pattern": "/u/[...p]", "parameters": [], "catch_all": null}"#
        )
        .is_err());
    }

    #[test]
    fn test_from_str() {
        let route: Route = "/users/[...parts]".parse().unwrap();
        assert_eq!(route.catch_all(), Some("parts"));
        assert!("/users/[...parts]/edit".parse::<Route>().is_err());
    }
}
