mod error;
mod path_validator;

pub use error::{PathValidatorError, SecurityViolation};
pub use path_validator::{PathValidator, is_hidden_path};
