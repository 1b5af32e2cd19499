mod site;
pub mod tracing;

pub use site::{TestRouter, TestSite};
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};
