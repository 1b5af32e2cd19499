mod error;
mod loader;
mod normalize;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_spec};
pub use types::{
    ConfigSpec, Configuration, LambdaConfig, LambdaSpec, MultisiteConfig, MultisiteSpec,
    SecurityConfig, SecuritySpec, Toggle,
};
