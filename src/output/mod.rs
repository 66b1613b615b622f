pub mod formatter;

pub use formatter::{format_distance, format_json, format_result, format_score, should_use_colors};
