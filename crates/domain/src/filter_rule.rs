use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A single configured filter entry.
///
/// `Exact` matches one name only. `Suffix` keeps its leading dot and matches
/// every name strictly below that domain, e.g. `.example.com` matches
/// `a.example.com` and `a.b.example.com` but neither `example.com` nor
/// `fooexample.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterRule {
    Exact(Arc<str>),
    Suffix(Arc<str>),
}

impl FilterRule {
    /// Validates `rule` against the rule grammar: an optional leading dot
    /// followed by dot-separated, non-empty labels of `[a-z0-9-]`.
    pub fn parse(rule: &str) -> Result<Self, DomainError> {
        let (is_suffix, body) = match rule.strip_prefix('.') {
            Some(rest) => (true, rest),
            None => (false, rule),
        };

        if body.is_empty() || !body.split('.').all(is_valid_label) {
            return Err(DomainError::InvalidFilterRule(rule.to_string()));
        }

        let literal: Arc<str> = Arc::from(rule);
        Ok(if is_suffix {
            FilterRule::Suffix(literal)
        } else {
            FilterRule::Exact(literal)
        })
    }

    /// The literal rule text, leading dot included for suffix rules.
    pub fn as_str(&self) -> &str {
        match self {
            FilterRule::Exact(s) | FilterRule::Suffix(s) => s,
        }
    }

    pub fn is_suffix(&self) -> bool {
        matches!(self, FilterRule::Suffix(_))
    }

    /// The domain a suffix rule hangs off, without the leading dot.
    pub fn domain(&self) -> &str {
        match self {
            FilterRule::Exact(s) => s,
            FilterRule::Suffix(s) => &s[1..],
        }
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl FromStr for FilterRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
