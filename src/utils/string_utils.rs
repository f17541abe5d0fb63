use crate::utils::errors::{BlameError, BlameResult};

/// Helper function for writing formatted strings to a buffer
/// Used across C emission
pub fn write_line(buf: &mut String, args: std::fmt::Arguments) -> BlameResult<()> {
    use std::fmt::Write;
    buf.write_fmt(args)
        .map_err(|_| BlameError::OutputError("fmt error".to_string()))
}
