mod annotations;
mod request_ctx;
mod response_ctx;

pub use annotations::*;
pub use request_ctx::*;
pub use response_ctx::*;
