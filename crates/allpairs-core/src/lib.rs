pub mod limits;
pub mod provider;

pub use limits::{GenerationLimits, LimitExceeded};
pub use provider::{Combination, ParameterProvider, ProviderError, ProviderOutput};
