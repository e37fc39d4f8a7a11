//! Test-parameter provider.
//!
//! Turns a named parameter space into pairwise-covering combinations:
//! the dimension sizes go to the generator, and each returned index tuple
//! is mapped back onto the concrete values (`chrome`, `768`, ...).

use std::collections::BTreeMap;

use tracing::{info, warn};

use allpairs_ir::parse::{parse_space, ParseError};
use allpairs_ir::types::{ParamValue, ParameterSpace};
use allpairs_ir::validate::{validate_space, ValidationError};
use allpairs_solver::coverage::{verify_coverage, CoverageError, CoverageReport};
use allpairs_solver::{requirement_count, ConfigError, PairwiseGenerator};

use crate::limits::{GenerationLimits, LimitExceeded};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid parameter space: {}", format_validation(.0))]
    Invalid(Vec<ValidationError>),

    #[error("limit exceeded: {0}")]
    Limit(#[from] LimitExceeded),

    #[error("generator configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("coverage check failed: {0}")]
    Coverage(#[from] CoverageError),

    #[error("generated combinations miss {missing} of {total} value pairs")]
    CoverageGap { missing: usize, total: usize },
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// One concrete parameter combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    /// Value index per dimension, in dimension order.
    pub indices: Vec<usize>,
    /// Dimension name -> chosen value.
    pub assignments: BTreeMap<String, ParamValue>,
}

impl Combination {
    pub fn get(&self, dimension: &str) -> Option<&ParamValue> {
        self.assignments.get(dimension)
    }
}

/// Result of one provider run.
#[derive(Debug, Clone)]
pub struct ProviderOutput {
    pub combinations: Vec<Combination>,
    /// Number of pair requirements the generator enumerated.
    pub requirement_count: usize,
    pub coverage: CoverageReport,
}

#[derive(Debug, Clone, Default)]
pub struct ParameterProvider {
    limits: GenerationLimits,
}

impl ParameterProvider {
    pub fn new(limits: GenerationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &GenerationLimits {
        &self.limits
    }

    /// Parse and validate a parameter-space document.
    pub fn load(&self, json: &str) -> Result<ParameterSpace, ProviderError> {
        self.limits.check_document(json.len()).inspect_err(|e| {
            warn!(event = "space_rejected", reason = %e);
        })?;
        let space = parse_space(json)?;
        validate_space(&space).map_err(ProviderError::Invalid)?;
        Ok(space)
    }

    /// Generate pairwise-covering combinations for `space`.
    pub fn combinations(&self, space: &ParameterSpace) -> Result<ProviderOutput, ProviderError> {
        validate_space(space).map_err(ProviderError::Invalid)?;
        self.limits.check_space(space).inspect_err(|e| {
            warn!(event = "space_rejected", space = space.name.as_deref().unwrap_or("-"), reason = %e);
        })?;

        let sizes = space.domain_sizes();
        let generator = PairwiseGenerator::new(&sizes)?;
        let requirements = requirement_count(&sizes);
        let tuples = generator.generate();

        let coverage = verify_coverage(&sizes, &tuples)?;
        if !coverage.is_complete() {
            return Err(ProviderError::CoverageGap {
                missing: coverage.total_pairs - coverage.covered_pairs,
                total: coverage.total_pairs,
            });
        }

        let combinations: Vec<Combination> = tuples
            .into_iter()
            .map(|indices| to_combination(space, indices))
            .collect();

        info!(
            event = "combinations_generated",
            space = space.name.as_deref().unwrap_or("-"),
            dimensions = sizes.len(),
            requirements,
            combinations = combinations.len(),
            cartesian = space.cartesian_size(),
        );

        Ok(ProviderOutput {
            combinations,
            requirement_count: requirements,
            coverage,
        })
    }

    /// [`load`](Self::load) followed by [`combinations`](Self::combinations).
    pub fn combinations_from_json(&self, json: &str) -> Result<ProviderOutput, ProviderError> {
        let space = self.load(json)?;
        self.combinations(&space)
    }
}

fn to_combination(space: &ParameterSpace, indices: Vec<usize>) -> Combination {
    let assignments = space
        .dimensions
        .iter()
        .zip(&indices)
        .filter_map(|(dimension, &index)| {
            dimension
                .values
                .get(index)
                .map(|value| (dimension.name.clone(), value.clone()))
        })
        .collect();
    Combination {
        indices,
        assignments,
    }
}
