pub mod cli;
pub mod conf;
pub mod ctx;
pub mod environment;
pub mod logging;
pub mod security;
pub mod stage;
pub mod static_files;
