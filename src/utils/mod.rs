pub mod file_magic;
pub mod parameter_error_handler;
pub mod validate;

pub use file_magic::{content_type_for, validate_magic_bytes};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
