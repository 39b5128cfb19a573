use crate::error::{BumpError, Result};
use regex::Regex;

/// Version part of a tag: MAJOR.MINOR.PATCH with an optional dotted pre-release
const VERSION_PATTERN: &str =
    r"(?P<version>\d+\.\d+\.\d+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)";

/// Tag naming scheme `<namespace>/<package>@<version>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    namespace: String,
}

impl TagPattern {
    /// Create a tag pattern for a namespace token (e.g. "ns")
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();

        if namespace.is_empty() {
            return Err(BumpError::config("Tag namespace must not be empty"));
        }
        if namespace.contains('@') || namespace.chars().any(char::is_whitespace) {
            return Err(BumpError::config(format!(
                "Tag namespace '{}' must not contain '@' or whitespace",
                namespace
            )));
        }

        Ok(TagPattern { namespace })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Format a tag name
    /// Example: namespace="ns", package="libA", version="1.2.3" -> "ns/libA@1.2.3"
    pub fn format(&self, package: &str, version: &str) -> String {
        format!("{}/{}@{}", self.namespace, package, version)
    }

    /// Compile the matcher for one package's tags
    pub fn matcher(&self, package: &str) -> Result<TagMatcher> {
        self.compile(&regex::escape(package), package)
    }

    /// Compile a matcher accepting the tags of every package in the namespace
    pub fn namespace_matcher(&self) -> Result<TagMatcher> {
        self.compile(r"[^@\s]+", &self.namespace)
    }

    fn compile(&self, package_pattern: &str, label: &str) -> Result<TagMatcher> {
        let pattern = format!(
            "^{}/{}@{}$",
            regex::escape(&self.namespace),
            package_pattern,
            VERSION_PATTERN
        );

        let regex = Regex::new(&pattern)
            .map_err(|e| BumpError::tag(format!("Invalid tag pattern for '{}': {}", label, e)))?;

        Ok(TagMatcher { regex })
    }
}

/// Compiled matcher for `<namespace>/<package>@<version>` tags
#[derive(Debug, Clone)]
pub struct TagMatcher {
    regex: Regex,
}

impl TagMatcher {
    /// Return the version part of a matching tag, including any pre-release suffix
    pub fn capture_version<'t>(&self, tag: &'t str) -> Option<&'t str> {
        self.regex
            .captures(tag)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.as_str())
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }
}
