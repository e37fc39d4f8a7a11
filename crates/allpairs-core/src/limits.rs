//! Generation limits.
//!
//! Caps on document size, dimension count, values per dimension and the
//! number of pair requirements a single run may enumerate. Checked before
//! the generator runs so oversized inputs are rejected up front.

use serde::{Deserialize, Serialize};

use allpairs_ir::types::ParameterSpace;
use allpairs_solver::requirement_count;

/// Limits for a single generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationLimits {
    /// Maximum number of dimensions in a parameter space.
    pub max_dimensions: usize,
    /// Maximum number of values in any one dimension.
    pub max_values_per_dimension: usize,
    /// Maximum number of pair requirements (Σ size(i)·size(j)).
    pub max_requirements: usize,
    /// Maximum parameter-space JSON size in bytes.
    pub max_document_bytes: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_dimensions: 64,
            max_values_per_dimension: 1024,
            max_requirements: 1_000_000,
            max_document_bytes: 1024 * 1024, // 1 MB
        }
    }
}

/// Which limit a parameter space ran into.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitExceeded {
    #[error("document is {bytes} bytes (max {max})")]
    DocumentTooLarge { bytes: usize, max: usize },

    #[error("{count} dimensions (max {max})")]
    TooManyDimensions { count: usize, max: usize },

    #[error("dimension '{dimension}' has {count} values (max {max})")]
    TooManyValues {
        dimension: String,
        count: usize,
        max: usize,
    },

    #[error("{count} pair requirements (max {max})")]
    TooManyRequirements { count: usize, max: usize },
}

impl GenerationLimits {
    pub fn check_document(&self, bytes: usize) -> Result<(), LimitExceeded> {
        if bytes > self.max_document_bytes {
            return Err(LimitExceeded::DocumentTooLarge {
                bytes,
                max: self.max_document_bytes,
            });
        }
        Ok(())
    }

    /// Check a parsed space. Dimension counts come first so the requirement
    /// count is only computed for spaces of sane shape.
    pub fn check_space(&self, space: &ParameterSpace) -> Result<(), LimitExceeded> {
        if space.dimensions.len() > self.max_dimensions {
            return Err(LimitExceeded::TooManyDimensions {
                count: space.dimensions.len(),
                max: self.max_dimensions,
            });
        }
        if let Some(dimension) = space
            .dimensions
            .iter()
            .find(|d| d.values.len() > self.max_values_per_dimension)
        {
            return Err(LimitExceeded::TooManyValues {
                dimension: dimension.name.clone(),
                count: dimension.values.len(),
                max: self.max_values_per_dimension,
            });
        }
        let count = requirement_count(&space.domain_sizes());
        if count > self.max_requirements {
            return Err(LimitExceeded::TooManyRequirements {
                count,
                max: self.max_requirements,
            });
        }
        Ok(())
    }
}
