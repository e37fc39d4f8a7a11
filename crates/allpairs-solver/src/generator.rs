//! First-fit greedy pairwise generation.
//!
//! 1. Build one domain per input size and the tuple set builder over them.
//! 2. Enumerate every requirement: domain pairs `i < j`, values of `i` in the
//!    outer loop, values of `j` in the inner loop.
//! 3. Absorb each requirement into the first existing tuple that accepts it,
//!    or into a fresh tuple when none does.
//! 4. Finish all tuples and return them as index arrays.
//!
//! The output depends only on the input order. It is not a minimal covering
//! array, but every pair of values from two different domains appears in at
//! least one tuple.

use tracing::debug;

use crate::builder::TupleSetBuilder;
use crate::domain::{ConfigError, Domain, Requirement, Value};
use crate::tuple::Tuple;

/// Generate pairwise-covering index tuples for the given domain sizes.
///
/// Element `d` of every returned tuple is a value index of domain `d`.
pub fn generate(domain_sizes: &[usize]) -> Result<Vec<Vec<usize>>, ConfigError> {
    Ok(PairwiseGenerator::new(domain_sizes)?.generate())
}

/// Number of requirements [`generate`] will enumerate for these sizes.
pub fn requirement_count(domain_sizes: &[usize]) -> usize {
    let mut count = 0usize;
    for i in 0..domain_sizes.len() {
        for j in (i + 1)..domain_sizes.len() {
            count = count.saturating_add(domain_sizes[i].saturating_mul(domain_sizes[j]));
        }
    }
    count
}

#[derive(Debug, Clone)]
pub struct PairwiseGenerator {
    builder: TupleSetBuilder,
}

impl PairwiseGenerator {
    /// Domains are named `d0`, `d1`, ... after their position.
    pub fn new(domain_sizes: &[usize]) -> Result<Self, ConfigError> {
        let domains = domain_sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Domain::new(format!("d{i}"), size))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_domains(domains)
    }

    pub fn from_domains(domains: Vec<Domain>) -> Result<Self, ConfigError> {
        Ok(Self {
            builder: TupleSetBuilder::new(domains)?,
        })
    }

    pub fn builder(&self) -> &TupleSetBuilder {
        &self.builder
    }

    /// All requirements in processing order.
    pub fn requirements(&self) -> Vec<Requirement> {
        let domains = self.builder.domains();
        let mut requirements = Vec::new();

        for i in 0..domains.len() {
            for j in (i + 1)..domains.len() {
                for a in domains[i].values() {
                    for b in domains[j].values() {
                        // i < j, so the domains always differ.
                        requirements.push(Requirement::new_unchecked(
                            Value::new(i, a),
                            Value::new(j, b),
                        ));
                    }
                }
            }
        }

        requirements
    }

    /// Run the greedy merge and return one index array per tuple.
    pub fn generate(&self) -> Vec<Vec<usize>> {
        let requirements = self.requirements();
        let mut tuples: Vec<Tuple> = Vec::new();

        for requirement in &requirements {
            if tuples.iter_mut().any(|t| t.absorb(requirement)) {
                continue;
            }
            let mut tuple = self.builder.new_tuple();
            let absorbed = tuple.absorb(requirement);
            debug_assert!(absorbed, "empty tuple must absorb {requirement}");
            tuples.push(tuple);
        }

        for tuple in tuples.iter_mut().filter(|t| !t.is_finished()) {
            tuple.finish();
        }

        debug!(
            event = "pairwise_generated",
            domains = self.builder.domain_count(),
            requirements = requirements.len(),
            tuples = tuples.len(),
        );

        let arrays: Vec<Vec<usize>> = tuples.iter().filter_map(Tuple::to_index_array).collect();
        debug_assert_eq!(arrays.len(), tuples.len(), "unfinished tuple dropped from output");
        arrays
    }
}
