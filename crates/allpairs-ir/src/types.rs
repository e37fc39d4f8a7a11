use serde::{Deserialize, Serialize};

/// A named set of test-parameter dimensions.
///
/// Dimension order is significant: it is the domain order handed to the
/// pairwise generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub dimensions: Vec<Dimension>,
}

impl ParameterSpace {
    /// Number of values in each dimension, in order.
    pub fn domain_sizes(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.values.len()).collect()
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Size of the full cartesian product (saturating).
    pub fn cartesian_size(&self) -> usize {
        self.dimensions
            .iter()
            .fold(1usize, |acc, d| acc.saturating_mul(d.values.len()))
    }
}

/// One parameter dimension, e.g. `browser` or `viewport_width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub values: Vec<ParamValue>,
}

/// A concrete parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}
