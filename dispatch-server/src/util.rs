//! Small shared helpers

use shared::AppError;

/// Storage codes are short uppercase identifiers like `A01` or `G22`
pub fn validate_storage_code(value: &str, field: &str) -> Result<(), AppError> {
    let ok = (1..=5).contains(&value.len())
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "{field} must be 1-5 uppercase alphanumeric characters"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_codes() {
        for code in ["A", "A01", "G22", "BUF1", "12345"] {
            assert!(validate_storage_code(code, "code").is_ok(), "{code}");
        }
    }

    #[test]
    fn rejects_bad_codes() {
        for code in ["", "a01", "TOOLONG", "A-1", "A 1"] {
            assert!(validate_storage_code(code, "code").is_err(), "{code:?}");
        }
    }
}
