mod directory_index;
mod fallback_script;
mod multisite;
mod script_file;
mod security;
mod static_file;
mod trailing_slash;

pub use directory_index::DirectoryIndexStage;
pub use fallback_script::FallbackScriptStage;
pub use multisite::MultisiteRewriteStage;
pub use script_file::ScriptFileStage;
pub use security::SecurityStage;
pub use static_file::StaticFileStage;
pub use trailing_slash::TrailingSlashStage;
