use crate::errors::DomainError;
use crate::filter_rule::FilterRule;
use crate::suffix_trie::SuffixTrie;
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

/// The set of names whose AAAA records get suppressed.
///
/// Built once during setup through [`FilterSetBuilder`] or
/// [`FilterSet::from_rules`] and read-only afterwards, so it can be shared
/// behind an `Arc` by any number of concurrent requests.
#[derive(Default)]
pub struct FilterSet {
    rules: FxHashSet<Arc<str>>,
    exact: FxHashSet<Arc<str>>,
    suffixes: SuffixTrie,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> FilterSetBuilder {
        FilterSetBuilder::default()
    }

    /// Validates and inserts every rule. The first invalid entry fails the
    /// whole build.
    pub fn from_rules<I, S>(rules: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::builder();
        for rule in rules {
            builder.add(rule.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Returns true when `name` equals an exact rule or lies below a suffix
    /// rule. `name` must already be lowercased and have its trailing root dot
    /// stripped.
    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        if self.exact.contains(name) {
            return true;
        }
        self.suffixes.lookup(name)
    }

    /// Literal rule lookup, e.g. `contains(".example.com")`.
    pub fn contains(&self, rule: &str) -> bool {
        self.rules.contains(rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn exact_count(&self) -> usize {
        self.exact.len()
    }

    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }

    /// All rules in sorted order.
    pub fn rules(&self) -> Vec<&str> {
        let mut rules: Vec<&str> = self.rules.iter().map(|r| r.as_ref()).collect();
        rules.sort_unstable();
        rules
    }

    fn insert(&mut self, rule: FilterRule) -> bool {
        match &rule {
            FilterRule::Exact(name) => {
                self.exact.insert(Arc::clone(name));
            }
            FilterRule::Suffix(_) => {
                self.suffixes.insert(rule.domain());
            }
        }
        match rule {
            FilterRule::Exact(s) | FilterRule::Suffix(s) => self.rules.insert(s),
        }
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSet")
            .field("rules", &self.rules())
            .finish()
    }
}

/// Append-only accumulator used while reading configuration.
#[derive(Default)]
pub struct FilterSetBuilder {
    set: FilterSet,
}

impl FilterSetBuilder {
    pub fn add(&mut self, rule: &str) -> Result<&mut Self, DomainError> {
        let rule = FilterRule::parse(rule)?;
        self.set.insert(rule);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn build(self) -> FilterSet {
        self.set
    }
}
