use std::collections::HashSet;

use crate::types::{Dimension, ParameterSpace};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Too few dimensions: pairwise coverage needs at least 2, got {count}")]
    TooFewDimensions { count: usize },

    #[error("Empty dimension name at position {position}")]
    EmptyName { position: usize },

    #[error("Duplicate dimension name '{name}'")]
    DuplicateDimension { name: String },

    #[error("Dimension '{dimension}' has no values")]
    NoValues { dimension: String },

    #[error("Dimension '{dimension}' lists value '{value}' more than once")]
    DuplicateValue { dimension: String, value: String },
}

/// Check a parameter space, collecting every problem found.
pub fn validate_space(space: &ParameterSpace) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if space.dimensions.len() < 2 {
        errors.push(ValidationError::TooFewDimensions {
            count: space.dimensions.len(),
        });
    }
    validate_names(space, &mut errors);
    for dimension in &space.dimensions {
        validate_values(dimension, &mut errors);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Names must be non-empty and unique; combinations are keyed by them.
fn validate_names(space: &ParameterSpace, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (position, dimension) in space.dimensions.iter().enumerate() {
        if dimension.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { position });
            continue;
        }
        if !seen.insert(dimension.name.as_str()) {
            errors.push(ValidationError::DuplicateDimension {
                name: dimension.name.clone(),
            });
        }
    }
}

fn validate_values(dimension: &Dimension, errors: &mut Vec<ValidationError>) {
    if dimension.values.is_empty() {
        errors.push(ValidationError::NoValues {
            dimension: dimension.name.clone(),
        });
        return;
    }
    let mut seen = HashSet::new();
    for value in &dimension.values {
        if !seen.insert(value) {
            errors.push(ValidationError::DuplicateValue {
                dimension: dimension.name.clone(),
                value: value.to_string(),
            });
        }
    }
}
