//! Validation utilities for the Warehouse Stock Management system

use rust_decimal::Decimal;
use uuid::Uuid;

// ============================================================================
// Document Validations
// ============================================================================

/// Validate that a line-item quantity is strictly positive
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than 0");
    }
    Ok(())
}

/// Validate that a transfer actually moves stock: the source and destination
/// (direction, location) pairs must differ
pub fn validate_transfer_endpoints(
    from_direction_id: Uuid,
    from_location_id: Uuid,
    to_direction_id: Uuid,
    to_location_id: Uuid,
) -> Result<(), &'static str> {
    if from_direction_id == to_direction_id && from_location_id == to_location_id {
        return Err("Transfer source and destination must differ");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate that a catalog name is non-empty after trimming
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(Decimal::from_str("0.001").unwrap()).is_ok());
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(Decimal::from_str("-5").unwrap()).is_err());
    }

    #[test]
    fn transfer_endpoints_must_differ() {
        let d1 = Uuid::new_v4();
        let d2 = Uuid::new_v4();
        let l1 = Uuid::new_v4();
        let l2 = Uuid::new_v4();

        assert!(validate_transfer_endpoints(d1, l1, d1, l1).is_err());
        // Same location but different direction is a real move
        assert!(validate_transfer_endpoints(d1, l1, d2, l1).is_ok());
        assert!(validate_transfer_endpoints(d1, l1, d1, l2).is_ok());
    }

    #[test]
    fn email_basic_shape() {
        assert!(validate_email("ops@example.com").is_ok());
        assert!(validate_email("nope").is_err());
    }
}
