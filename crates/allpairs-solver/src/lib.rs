pub mod builder;
pub mod coverage;
pub mod domain;
pub mod generator;
pub mod tuple;

pub use builder::TupleSetBuilder;
pub use coverage::{verify_coverage, CoverageError, CoverageReport, PairTarget};
pub use domain::{ConfigError, Domain, Requirement, Value};
pub use generator::{generate, requirement_count, PairwiseGenerator};
pub use tuple::{Slot, Tuple};
