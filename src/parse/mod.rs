pub mod json_format;
pub mod line_parser;
pub mod line_serializer;

pub use json_format::{parse_json, serialize_json};
pub use line_parser::parse_lines;
pub use line_serializer::serialize_lines;
