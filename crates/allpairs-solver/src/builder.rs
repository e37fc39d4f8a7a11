//! Ordered domain list and tuple factory.

use crate::domain::{ConfigError, Domain};
use crate::tuple::Tuple;

/// Holds the domains of one generation run in input order.
#[derive(Debug, Clone)]
pub struct TupleSetBuilder {
    domains: Vec<Domain>,
}

impl TupleSetBuilder {
    /// Fails with [`ConfigError::TooFewDomains`] for fewer than two domains.
    pub fn new(domains: Vec<Domain>) -> Result<Self, ConfigError> {
        if domains.len() < 2 {
            return Err(ConfigError::TooFewDomains {
                count: domains.len(),
            });
        }
        Ok(Self { domains })
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn domain(&self, index: usize) -> Option<&Domain> {
        self.domains.get(index)
    }

    /// Position of the first domain called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.domains.iter().position(|d| d.name() == name)
    }

    pub fn new_tuple(&self) -> Tuple {
        Tuple::empty(self.domains.len())
    }
}
