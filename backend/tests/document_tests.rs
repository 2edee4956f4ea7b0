//! Document and catalog model tests

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{LocationType, Supplier, TransferItem};
use shared::types::Pagination;

fn supplier(last: Option<&str>, first: Option<&str>, middle: Option<&str>) -> Supplier {
    Supplier {
        id: Uuid::new_v4(),
        name: "Acme Supplies".to_string(),
        phone: None,
        email: None,
        contact_last_name: last.map(str::to_string),
        contact_first_name: first.map(str::to_string),
        contact_middle_name: middle.map(str::to_string),
        tax_id: None,
        tax_reg_code: None,
        created_at: Utc::now(),
    }
}

fn transfer_item(from: (Uuid, Uuid), to: (Uuid, Uuid)) -> TransferItem {
    TransferItem {
        id: Uuid::new_v4(),
        transfer_id: Uuid::new_v4(),
        material_id: Uuid::new_v4(),
        quantity: Decimal::ONE,
        from_direction_id: from.0,
        from_location_id: from.1,
        to_direction_id: to.0,
        to_location_id: to.1,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_endpoints_identical() {
        let d = Uuid::new_v4();
        let l = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(transfer_item((d, l), (d, l)).endpoints_identical());
        // Changing either half of the pair makes it a real move
        assert!(!transfer_item((d, l), (other, l)).endpoints_identical());
        assert!(!transfer_item((d, l), (d, other)).endpoints_identical());
    }

    #[test]
    fn test_supplier_contact_name_skips_missing_parts() {
        assert_eq!(
            supplier(Some("Petrova"), Some("Anna"), Some("Ivanovna")).contact_name(),
            "Petrova Anna Ivanovna"
        );
        assert_eq!(
            supplier(Some("Petrova"), None, Some("Ivanovna")).contact_name(),
            "Petrova Ivanovna"
        );
        assert_eq!(supplier(None, None, None).contact_name(), "");
        // Empty strings are treated like missing parts
        assert_eq!(
            supplier(Some(""), Some("Anna"), None).contact_name(),
            "Anna"
        );
    }

    #[test]
    fn test_location_type_round_trip() {
        for kind in [
            LocationType::Warehouse,
            LocationType::Production,
            LocationType::Office,
            LocationType::Other,
        ] {
            assert_eq!(LocationType::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(LocationType::from_str("garage").is_err());
    }

    #[test]
    fn test_pagination_offsets() {
        let first = Pagination {
            page: 1,
            per_page: 50,
        };
        assert_eq!(first.offset(), 0);
        assert_eq!(first.limit(), 50);

        let third = Pagination {
            page: 3,
            per_page: 25,
        };
        assert_eq!(third.offset(), 50);

        // Page 0 is clamped rather than underflowing
        let zero = Pagination {
            page: 0,
            per_page: 25,
        };
        assert_eq!(zero.offset(), 0);
    }

    #[test]
    fn test_document_dates_parse() {
        let date = NaiveDate::parse_from_str("2025-03-14", "%Y-%m-%d").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }
}
