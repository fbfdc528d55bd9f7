//! Eager argument checks shared by the operator entry points.

use crate::error::ArgumentError;

/// Returns `value` if it is at least `min`.
pub(crate) fn require_at_least(
    param: &'static str,
    value: usize,
    min: usize,
) -> Result<usize, ArgumentError> {
    if value < min {
        return Err(ArgumentError::OutOfRange {
            param,
            value: value as i64,
            min: min as i64,
        });
    }
    Ok(value)
}

/// Offsets for the windowing operators must be positive.
pub(crate) fn require_offset(offset: usize) -> Result<usize, ArgumentError> {
    require_at_least("offset", offset, 1)
}

pub(crate) fn require_present<T>(param: &'static str, value: Option<T>) -> Result<T, ArgumentError> {
    value.ok_or(ArgumentError::Missing { param })
}

/// Parses a signed count from text and checks its lower bound.
///
/// Negative input is reported as [`ArgumentError::OutOfRange`] rather than a
/// parse failure, so callers see the same error a bad literal would produce.
pub fn parse_count(param: &'static str, text: &str, min: usize) -> Result<usize, ArgumentError> {
    let value: i64 = text.trim().parse().map_err(|_| ArgumentError::Malformed {
        param,
        value: text.to_string(),
    })?;

    if value < min as i64 {
        return Err(ArgumentError::OutOfRange {
            param,
            value,
            min: min as i64,
        });
    }

    usize::try_from(value).map_err(|_| ArgumentError::Malformed {
        param,
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offset_is_rejected() {
        let err = require_offset(0).unwrap_err();
        assert_eq!(err.param(), "offset");
        assert_eq!(require_offset(3), Ok(3));
    }

    #[test]
    fn parse_count_reports_negative_values_as_out_of_range() {
        let err = parse_count("offset", "-4", 1).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::OutOfRange {
                param: "offset",
                value: -4,
                min: 1
            }
        );
    }

    #[test]
    fn parse_count_rejects_garbage() {
        let err = parse_count("width", "ten", 0).unwrap_err();
        assert!(matches!(err, ArgumentError::Malformed { param: "width", .. }));
        assert_eq!(parse_count("width", " 0 ", 0), Ok(0));
    }

    #[test]
    fn require_present_names_missing_param() {
        let err = require_present::<u8>("source", None).unwrap_err();
        assert_eq!(err, ArgumentError::Missing { param: "source" });
    }
}
