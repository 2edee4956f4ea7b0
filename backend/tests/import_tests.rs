//! CSV import parsing tests
//!
//! Verifies row-level parsing for the bulk income import: well-formed rows
//! produce typed values, malformed rows are rejected with a message and do
//! not abort the rest of the file.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{ImportRow, RowParseError};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn parse_record(record: &csv::StringRecord) -> Result<ImportRow, RowParseError> {
    let fields: Vec<&str> = record.iter().collect();
    ImportRow::parse(&fields)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_parse_valid_row() {
        let row = ImportRow::parse(&[
            "2025-03-14",
            "INV-042",
            "Acme Supplies",
            "BRD-100",
            "12.500",
            "Production",
            "Main Warehouse",
        ])
        .unwrap();

        assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(row.document_number.as_deref(), Some("INV-042"));
        assert_eq!(row.supplier, "Acme Supplies");
        assert_eq!(row.material_article, "BRD-100");
        assert_eq!(row.quantity, dec("12.5"));
        assert_eq!(row.direction, "Production");
        assert_eq!(row.location, "Main Warehouse");
    }

    #[test]
    fn test_empty_document_number_becomes_none() {
        let row = ImportRow::parse(&[
            "2025-03-14",
            "  ",
            "Acme Supplies",
            "BRD-100",
            "1",
            "Production",
            "Main Warehouse",
        ])
        .unwrap();

        assert_eq!(row.document_number, None);
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let err = ImportRow::parse(&["2025-03-14", "INV-042", "Acme"]).unwrap_err();
        assert_eq!(err, RowParseError::ColumnCount(3));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = ImportRow::parse(&[
            "14.03.2025",
            "",
            "Acme Supplies",
            "BRD-100",
            "1",
            "Production",
            "Main Warehouse",
        ])
        .unwrap_err();
        assert_eq!(err, RowParseError::InvalidDate("14.03.2025".to_string()));
    }

    #[test]
    fn test_nonpositive_quantity_rejected() {
        for quantity in ["0", "-3.5"] {
            let err = ImportRow::parse(&[
                "2025-03-14",
                "",
                "Acme Supplies",
                "BRD-100",
                quantity,
                "Production",
                "Main Warehouse",
            ])
            .unwrap_err();
            assert_eq!(err, RowParseError::NonPositiveQuantity);
        }
    }

    #[test]
    fn test_unparseable_quantity_rejected() {
        let err = ImportRow::parse(&[
            "2025-03-14",
            "",
            "Acme Supplies",
            "BRD-100",
            "twelve",
            "Production",
            "Main Warehouse",
        ])
        .unwrap_err();
        assert_eq!(err, RowParseError::InvalidQuantity("twelve".to_string()));
    }

    #[test]
    fn test_blank_required_field_rejected() {
        let err = ImportRow::parse(&[
            "2025-03-14",
            "",
            "",
            "BRD-100",
            "1",
            "Production",
            "Main Warehouse",
        ])
        .unwrap_err();
        assert_eq!(err, RowParseError::EmptyField("supplier"));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let row = ImportRow::parse(&[
            " 2025-03-14 ",
            " INV-042 ",
            " Acme Supplies ",
            " BRD-100 ",
            " 2 ",
            " Production ",
            " Main Warehouse ",
        ])
        .unwrap();

        assert_eq!(row.supplier, "Acme Supplies");
        assert_eq!(row.material_article, "BRD-100");
        assert_eq!(row.quantity, dec("2"));
    }

    /// A bad row is reported but does not stop later rows from parsing
    #[test]
    fn test_mixed_file_parses_per_row() {
        let csv_text = "\
date,document_number,supplier,material_article,quantity,direction,location
2025-03-14,INV-001,Acme Supplies,BRD-100,10,Production,Main Warehouse
not-a-date,INV-002,Acme Supplies,BRD-100,5,Production,Main Warehouse
2025-03-15,,Acme Supplies,BRD-200,2.5,Production,Main Warehouse
";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let results: Vec<Result<ImportRow, RowParseError>> = reader
            .records()
            .map(|record| parse_record(&record.unwrap()))
            .collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert_eq!(results[2].as_ref().unwrap().document_number, None);
    }

    /// Quoted fields with embedded commas survive the CSV reader
    #[test]
    fn test_quoted_fields() {
        let csv_text = "\
date,document_number,supplier,material_article,quantity,direction,location
2025-03-14,INV-001,\"Acme, Inc.\",BRD-100,10,Production,Main Warehouse
";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let record = reader.records().next().unwrap().unwrap();
        let row = parse_record(&record).unwrap();
        assert_eq!(row.supplier, "Acme, Inc.");
    }
}
