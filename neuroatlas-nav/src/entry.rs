//! The manual coordinate entry boundary: three independent integer text
//! fields. Malformed input is rejected here and never reaches the
//! transformer or resolver.

use thiserror::Error;

use neuroatlas_core::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("{field} must be an integer, got {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Parse the three entry fields into a coordinate.
///
/// Fields are trimmed; a leading `+` is accepted. The first field that
/// fails to parse is reported by name.
pub fn parse_fields(x: &str, y: &str, z: &str) -> Result<Coordinate, EntryError> {
    Ok(Coordinate::new(
        parse_field("x", x)?,
        parse_field("y", y)?,
        parse_field("z", z)?,
    ))
}

fn parse_field(field: &'static str, value: &str) -> Result<i32, EntryError> {
    value
        .trim()
        .parse()
        .map_err(|_| EntryError::InvalidField {
            field,
            value: value.to_string(),
        })
}
