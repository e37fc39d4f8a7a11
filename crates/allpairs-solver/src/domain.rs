//! Domains, values and pair requirements.
//!
//! A domain is one parameter dimension whose values are addressed by index
//! `0..size`. A [`Value`] names one of those indices inside one domain, and a
//! [`Requirement`] is a pair of values from two different domains that must
//! appear together in at least one generated tuple.

/// Errors raised while configuring a generation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("pairwise generation needs at least 2 domains, got {count}")]
    TooFewDomains { count: usize },

    #[error("domain '{name}' has no values")]
    EmptyDomain { name: String },

    #[error("requirement pairs two values of domain {domain}")]
    SameDomain { domain: usize },
}

/// One parameter dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    name: String,
    size: usize,
}

impl Domain {
    pub fn new(name: impl Into<String>, size: usize) -> Result<Self, ConfigError> {
        let name = name.into();
        if size < 1 {
            return Err(ConfigError::EmptyDomain { name });
        }
        Ok(Self { name, size })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Value indices of this domain, lowest first.
    pub fn values(&self) -> std::ops::Range<usize> {
        0..self.size
    }
}

/// A concrete value: index `index` of the domain at position `domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Value {
    pub domain: usize,
    pub index: usize,
}

impl Value {
    pub fn new(domain: usize, index: usize) -> Self {
        Self { domain, index }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}={}", self.domain, self.index)
    }
}

/// Two values from different domains that some tuple must carry together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Requirement {
    a: Value,
    b: Value,
}

impl Requirement {
    /// Fails with [`ConfigError::SameDomain`] when both values share a domain.
    pub fn new(a: Value, b: Value) -> Result<Self, ConfigError> {
        if a.domain == b.domain {
            return Err(ConfigError::SameDomain { domain: a.domain });
        }
        Ok(Self { a, b })
    }

    /// Caller guarantees `a.domain != b.domain`.
    pub(crate) fn new_unchecked(a: Value, b: Value) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> Value {
        self.a
    }

    pub fn b(&self) -> Value {
        self.b
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}
