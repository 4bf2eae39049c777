//! Dedicated-project name patterns
//!
//! A pattern is either an exact package name or, when prefixed with `/`, a
//! regular expression matched from the start of the name.

use crate::{Error, Result};
use regex::Regex;

const REGEX_PREFIX: char = '/';

#[derive(Debug, Clone)]
enum Pattern {
    Exact(String),
    Regex { source: String, regex: Regex },
}

impl Pattern {
    fn parse(raw: &str) -> Result<Self> {
        match raw.strip_prefix(REGEX_PREFIX) {
            Some(expr) => {
                let regex = Regex::new(&format!("^(?:{expr})")).map_err(|source| {
                    Error::InvalidDedicatedProjectPattern {
                        pattern: raw.to_string(),
                        source,
                    }
                })?;
                Ok(Pattern::Regex {
                    source: raw.to_string(),
                    regex,
                })
            }
            None => Ok(Pattern::Exact(raw.to_string())),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Exact(exact) => exact == name,
            Pattern::Regex { regex, .. } => regex.is_match(name),
        }
    }
}

/// Compiled set of patterns selecting packages that get their own project.
#[derive(Debug, Clone, Default)]
pub struct DedicatedPatterns {
    patterns: Vec<Pattern>,
}

impl DedicatedPatterns {
    pub fn compile<S: AsRef<str>>(raw: &[S]) -> Result<Self> {
        let patterns = raw
            .iter()
            .map(|pattern| Pattern::parse(pattern.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(name))
    }

    /// Fail on the first exact pattern for which `discovered` is false.
    ///
    /// Regex patterns are allowed to match nothing.
    pub fn ensure_exact_matched(&self, discovered: impl Fn(&str) -> bool) -> Result<()> {
        for pattern in &self.patterns {
            if let Pattern::Exact(name) = pattern {
                if !discovered(name) {
                    return Err(Error::UnmatchedDedicatedProjectPattern {
                        pattern: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The patterns as originally written.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| match pattern {
            Pattern::Exact(name) => name.as_str(),
            Pattern::Regex { source, .. } => source.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/Foo.*", "FooCore", true)]
    #[case("/Foo.*", "FooUtils", true)]
    #[case("/Foo.*", "Bar", false)]
    #[case("/Foo", "MyFoo", false)]
    #[case("/Foo", "Foobar", true)]
    #[case("Foo", "Foobar", false)]
    #[case("Foo", "Foo", true)]
    #[case("Foo", "foo", false)]
    fn pattern_matching(#[case] pattern: &str, #[case] name: &str, #[case] expected: bool) {
        let patterns = DedicatedPatterns::compile(&[pattern]).unwrap();
        assert_eq!(patterns.matches(name), expected);
    }

    #[test]
    fn invalid_regex_is_reported_with_its_source() {
        let err = DedicatedPatterns::compile(&["/Foo("]).unwrap_err();
        match err {
            Error::InvalidDedicatedProjectPattern { pattern, .. } => assert_eq!(pattern, "/Foo("),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn only_exact_patterns_must_match() {
        let patterns = DedicatedPatterns::compile(&["/Nothing.*", "Core", "Missing"]).unwrap();
        let err = patterns
            .ensure_exact_matched(|name| name == "Core")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnmatchedDedicatedProjectPattern { ref pattern } if pattern == "Missing"
        ));

        patterns
            .ensure_exact_matched(|name| name == "Core" || name == "Missing")
            .unwrap();
    }

    #[test]
    fn sources_round_trip_the_configured_text() {
        let patterns = DedicatedPatterns::compile(&["Core", "/Foo.*"]).unwrap();
        assert_eq!(patterns.sources().collect::<Vec<_>>(), vec!["Core", "/Foo.*"]);
        assert!(!patterns.is_empty());
        assert!(DedicatedPatterns::default().is_empty());
    }
}
