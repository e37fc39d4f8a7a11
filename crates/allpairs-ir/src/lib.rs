pub mod parse;
pub mod types;
pub mod validate;

pub use parse::parse_space;
pub use validate::validate_space;
