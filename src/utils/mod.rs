pub mod paths;

pub use paths::{format_path_with_tilde, slugify_title, validate_file_size};
