mod directory_listing;
mod file;
mod mime;

pub use directory_listing::render_directory_listing;
pub use file::{ServeError, render_file};
pub use mime::content_type_for;
