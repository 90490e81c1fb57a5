/*!
Ant-style path patterns and the predicates built from them.

Each docket owns its own include and exclude predicates; nothing here is shared
between groups.
*/

use crate::error::{DocketError, DocketResult};
use regex::Regex;
use std::fmt;

/// Pattern used when a group does not restrict its paths
pub const CATCH_ALL_PATTERN: &str = "/**";

/// A single compiled Ant-style glob such as `/api/**` or `/users/{id}`
///
/// - `?` matches one character other than `/`
/// - `*` matches zero or more characters other than `/`
/// - `**` matches zero or more whole path segments
/// - `{name}` matches one non-empty run of characters other than `/`
/// - `{name:regex}` matches `regex`
#[derive(Debug, Clone)]
pub struct AntPattern {
    source: String,
    regex: Regex,
}

impl AntPattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> DocketResult<Self> {
        let regex = Regex::new(&Self::to_regex(pattern))
            .map_err(|e| DocketError::pattern_error(pattern, e))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written in configuration
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether a request path matches this pattern
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    fn to_regex(pattern: &str) -> String {
        let chars: Vec<char> = pattern.chars().collect();
        let mut out = String::with_capacity(pattern.len() * 2 + 2);
        out.push('^');

        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '/' if chars.get(i + 1) == Some(&'*') && chars.get(i + 2) == Some(&'*') => {
                    match chars.get(i + 3) {
                        // Trailing `/**` also matches the bare parent path
                        None => out.push_str("(?:/.*)?"),
                        // Inner `/**/` spans zero or more non-empty segments
                        Some('/') => out.push_str("(?:/[^/]+)*"),
                        // `/**x` is an ordinary segment wildcard
                        Some(_) => out.push_str("/[^/]*"),
                    }
                    i += 3;
                }
                '*' => {
                    out.push_str("[^/]*");
                    while chars.get(i) == Some(&'*') {
                        i += 1;
                    }
                }
                '?' => {
                    out.push_str("[^/]");
                    i += 1;
                }
                '{' => match Self::closing_brace(&chars, i) {
                    Some(end) => {
                        let variable: String = chars[i + 1..end].iter().collect();
                        match variable.split_once(':') {
                            Some((_, constraint)) => {
                                out.push_str("(?:");
                                out.push_str(constraint);
                                out.push(')');
                            }
                            None => out.push_str("[^/]+"),
                        }
                        i = end + 1;
                    }
                    None => {
                        out.push_str(r"\{");
                        i += 1;
                    }
                },
                c => {
                    let mut buf = [0u8; 4];
                    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                    i += 1;
                }
            }
        }

        out.push('$');
        out
    }

    /// Index of the `}` closing the template variable opened at `open`
    fn closing_brace(chars: &[char], open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, c) in chars[open..].iter().enumerate() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(open + offset);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

impl PartialEq for AntPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for AntPattern {}

impl fmt::Display for AntPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Predicate over request paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPredicate {
    /// Matches every path
    Always,
    /// Matches no path
    Never,
    /// Matches when at least one pattern matches
    AnyOf(Vec<AntPattern>),
}

impl PathPredicate {
    /// Predicate matching every path
    pub fn all() -> Self {
        Self::Always
    }

    /// Predicate matching nothing
    pub fn none() -> Self {
        Self::Never
    }

    /// Combine patterns with logical OR. An empty list matches nothing.
    pub fn any_of<I, S>(patterns: I) -> DocketResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| AntPattern::new(p.as_ref()))
            .collect::<DocketResult<Vec<_>>>()?;

        if compiled.is_empty() {
            Ok(Self::Never)
        } else {
            Ok(Self::AnyOf(compiled))
        }
    }

    /// Check whether a path satisfies the predicate
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::AnyOf(patterns) => patterns.iter().any(|p| p.matches(path)),
        }
    }

    /// Patterns behind this predicate, as configured
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Always => vec![CATCH_ALL_PATTERN],
            Self::Never => Vec::new(),
            Self::AnyOf(patterns) => patterns.iter().map(AntPattern::as_str).collect(),
        }
    }
}

/// Build the include predicate for a group. No patterns means `/**`.
pub fn include_predicate(patterns: &[String]) -> DocketResult<PathPredicate> {
    if patterns.is_empty() || patterns.iter().all(|p| p == CATCH_ALL_PATTERN) {
        tracing::debug!("Include paths default to {}", CATCH_ALL_PATTERN);
        return Ok(PathPredicate::all());
    }

    tracing::debug!("Include paths: {:?}", patterns);
    PathPredicate::any_of(patterns)
}

/// Build the exclude predicate for a group. No patterns excludes nothing.
pub fn exclude_predicate(patterns: &[String]) -> DocketResult<PathPredicate> {
    if !patterns.is_empty() {
        tracing::debug!("Exclude paths: {:?}", patterns);
    }
    PathPredicate::any_of(patterns)
}

/// Path filter of a docket: exclusions are checked before inclusions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSelector {
    include: PathPredicate,
    exclude: PathPredicate,
}

impl PathSelector {
    pub fn new(include: PathPredicate, exclude: PathPredicate) -> Self {
        Self { include, exclude }
    }

    /// Selector that lets every path through
    pub fn any() -> Self {
        Self::new(PathPredicate::all(), PathPredicate::none())
    }

    pub fn include(&self) -> &PathPredicate {
        &self.include
    }

    pub fn exclude(&self) -> &PathPredicate {
        &self.exclude
    }

    /// Check whether a path belongs to the group
    pub fn is_selected(&self, path: &str) -> bool {
        !self.exclude.matches(path) && self.include.matches(path)
    }
}

impl Default for PathSelector {
    fn default() -> Self {
        Self::any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> AntPattern {
        AntPattern::new(p).unwrap()
    }

    #[test]
    fn test_double_star_matches_nested_segments() {
        let p = pattern("/api/**");
        assert!(p.matches("/api"));
        assert!(p.matches("/api/"));
        assert!(p.matches("/api/v1/users"));
        assert!(!p.matches("/apis"));
        assert!(!p.matches("/internal/api"));
    }

    #[test]
    fn test_double_star_in_the_middle() {
        let p = pattern("/api/**/health");
        assert!(p.matches("/api/health"));
        assert!(p.matches("/api/v1/admin/health"));
        assert!(!p.matches("/api/v1/healthz"));
    }

    #[test]
    fn test_single_star_stays_within_segment() {
        let p = pattern("/users/*");
        assert!(p.matches("/users/42"));
        assert!(!p.matches("/users/42/posts"));

        let p = pattern("/files/*.json");
        assert!(p.matches("/files/report.json"));
        assert!(!p.matches("/files/report.yaml"));
    }

    #[test]
    fn test_question_mark_and_template_variables() {
        assert!(pattern("/v?/users").matches("/v1/users"));
        assert!(!pattern("/v?/users").matches("/v10/users"));

        let p = pattern("/users/{id}/posts");
        assert!(p.matches("/users/{id}/posts"));
        assert!(p.matches("/users/7/posts"));
        assert!(!p.matches("/users//posts"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let p = pattern("/search.v1/(all)");
        assert!(p.matches("/search.v1/(all)"));
        assert!(!p.matches("/searchXv1/(all)"));
    }

    #[test]
    fn test_double_star_inside_a_segment_stays_within_it() {
        let p = pattern("/api/**.json");
        assert!(p.matches("/api/b.json"));
        assert!(!p.matches("/api/a/b.json"));

        let p = pattern("/api/v**");
        assert!(p.matches("/api/v2"));
        assert!(!p.matches("/api/v2/users"));
    }

    #[test]
    fn test_inner_double_star_needs_whole_segments() {
        let p = pattern("/a/**/b");
        assert!(p.matches("/a/b"));
        assert!(p.matches("/a/x/y/b"));
        assert!(!p.matches("/a//b"));
        assert!(!p.matches("/a/xb"));
    }

    #[test]
    fn test_template_variable_with_constraint() {
        let p = pattern("/users/{id:[0-9]{2}}");
        assert!(p.matches("/users/12"));
        assert!(!p.matches("/users/123"));
        assert!(!p.matches("/users/12}"));
        assert!(!p.matches("/users/ab"));
    }

    #[test]
    fn test_invalid_constraint_is_a_pattern_error() {
        let result = AntPattern::new("/users/{id:[0-9}");
        assert!(matches!(result, Err(DocketError::Pattern { .. })));
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let p = pattern("/odd/{name");
        assert!(p.matches("/odd/{name"));
    }

    #[test]
    fn test_empty_include_matches_every_path() {
        let include = include_predicate(&[]).unwrap();
        for path in ["/", "/api/users", "", "no-leading-slash", "/a/b/c/d"] {
            assert!(include.matches(path), "{path} should be included");
        }
        assert_eq!(include.patterns(), vec![CATCH_ALL_PATTERN]);
    }

    #[test]
    fn test_empty_exclude_matches_nothing() {
        let exclude = exclude_predicate(&[]).unwrap();
        for path in ["/", "/admin", "/admin/users", ""] {
            assert!(!exclude.matches(path), "{path} should not be excluded");
        }
    }

    #[test]
    fn test_any_of_is_logical_or() {
        let predicate =
            PathPredicate::any_of(["/users/**", "/orders/**"]).unwrap();
        assert!(predicate.matches("/users/1"));
        assert!(predicate.matches("/orders/1"));
        assert!(!predicate.matches("/products/1"));
    }

    #[test]
    fn test_selector_applies_exclusions_first() {
        let selector = PathSelector::new(
            include_predicate(&["/api/**".to_string()]).unwrap(),
            exclude_predicate(&["/api/admin/**".to_string()]).unwrap(),
        );

        assert!(selector.is_selected("/api/users"));
        assert!(!selector.is_selected("/api/admin/users"));
        assert!(!selector.is_selected("/health"));
    }

    #[test]
    fn test_predicates_are_independent_values() {
        let first = exclude_predicate(&["/admin/**".to_string()]).unwrap();
        let second = exclude_predicate(&[]).unwrap();

        assert!(first.matches("/admin/users"));
        assert!(!second.matches("/admin/users"));
    }
}
