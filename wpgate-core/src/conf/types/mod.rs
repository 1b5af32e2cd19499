mod runtime;
mod specification;

pub use runtime::{Configuration, LambdaConfig, MultisiteConfig, SecurityConfig};
pub use specification::{ConfigSpec, LambdaSpec, MultisiteSpec, SecuritySpec, Toggle};
