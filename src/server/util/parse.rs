use uuid::Uuid;

use crate::server::error::AppError;

/// Parses a comma separated list of UUIDs, ignoring empty segments.
///
/// # Arguments
/// - `field` - Request field name used in the validation error
/// - `value` - Raw comma separated string
///
/// # Returns
/// - `Ok(Vec<Uuid>)` - Parsed ids in input order
/// - `Err(AppError::Validation)` - A segment is not a valid UUID
pub fn parse_uuid_list(field: &str, value: &str) -> Result<Vec<Uuid>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            Uuid::parse_str(segment)
                .map_err(|_| AppError::validation(field, format!("Invalid id: {}", segment)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_skips_blanks() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let ids = parse_uuid_list("amenities", &format!("{}, ,{}", a, b)).unwrap();

        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn rejects_malformed_id() {
        let result = parse_uuid_list("amenities", "not-a-uuid");

        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "amenities"));
    }
}
