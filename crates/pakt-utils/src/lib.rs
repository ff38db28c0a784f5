pub mod json_file;
pub mod name;
pub mod package_spec;
pub mod path_utils;

pub use json_file::{read_json, write_json_atomic};
pub use name::{sanitize_file_component, validate_name};
pub use package_spec::parse_pkg_spec;
pub use path_utils::*;
