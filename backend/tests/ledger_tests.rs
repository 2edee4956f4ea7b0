//! Stock ledger tests
//!
//! Tests for the ledger delta core including:
//! - Sign table correctness per item kind
//! - Create-then-delete round-trip identity
//! - Transfer conservation and inversion
//! - The signed-sum invariant over arbitrary event sequences

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{ItemEffect, StockDelta, StockKey};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory ledger with the same merge semantics as the database upsert:
/// lazily created rows starting at zero, incremented per delta
fn apply(ledger: &mut HashMap<StockKey, Decimal>, deltas: &[StockDelta]) {
    for delta in deltas {
        *ledger.entry(delta.key).or_insert(Decimal::ZERO) += delta.quantity;
    }
}

fn income(key: StockKey, quantity: Decimal) -> ItemEffect {
    ItemEffect::Income {
        material_id: key.material_id,
        direction_id: key.direction_id,
        location_id: key.location_id,
        quantity,
    }
}

fn writeoff(key: StockKey, quantity: Decimal) -> ItemEffect {
    ItemEffect::WriteOff {
        material_id: key.material_id,
        direction_id: key.direction_id,
        location_id: key.location_id,
        quantity,
    }
}

fn transfer(material_id: Uuid, from: (Uuid, Uuid), to: (Uuid, Uuid), quantity: Decimal) -> ItemEffect {
    ItemEffect::Transfer {
        material_id,
        quantity,
        from_direction_id: from.0,
        from_location_id: from.1,
        to_direction_id: to.0,
        to_location_id: to.1,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Income credits its key with the full quantity
    #[test]
    fn test_income_sign() {
        let key = StockKey::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let deltas = income(key, dec("12.5")).deltas();

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].key, key);
        assert_eq!(deltas[0].quantity, dec("12.5"));
    }

    /// Write-off debits its key with the full quantity
    #[test]
    fn test_writeoff_sign() {
        let key = StockKey::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let deltas = writeoff(key, dec("3")).deltas();

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].key, key);
        assert_eq!(deltas[0].quantity, dec("-3"));
    }

    /// A transfer yields exactly two deltas: debit source, credit destination
    #[test]
    fn test_transfer_deltas() {
        let material = Uuid::new_v4();
        let from = (Uuid::new_v4(), Uuid::new_v4());
        let to = (Uuid::new_v4(), Uuid::new_v4());
        let deltas = transfer(material, from, to, dec("30")).deltas();

        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].key, StockKey::new(material, from.0, from.1));
        assert_eq!(deltas[0].quantity, dec("-30"));
        assert_eq!(deltas[1].key, StockKey::new(material, to.0, to.1));
        assert_eq!(deltas[1].quantity, dec("30"));
    }

    /// Transfer conservation: the sum over both keys is unchanged
    #[test]
    fn test_transfer_conserves_total() {
        let deltas = transfer(
            Uuid::new_v4(),
            (Uuid::new_v4(), Uuid::new_v4()),
            (Uuid::new_v4(), Uuid::new_v4()),
            dec("7.25"),
        )
        .deltas();

        let total: Decimal = deltas.iter().map(|d| d.quantity).sum();
        assert_eq!(total, Decimal::ZERO);
    }

    /// Deletion deltas are the exact inverse of creation deltas
    #[test]
    fn test_inverse_deltas() {
        let effect = transfer(
            Uuid::new_v4(),
            (Uuid::new_v4(), Uuid::new_v4()),
            (Uuid::new_v4(), Uuid::new_v4()),
            dec("4.5"),
        );

        let created = effect.deltas();
        let deleted = effect.inverse_deltas();

        assert_eq!(created.len(), deleted.len());
        for (c, d) in created.iter().zip(deleted.iter()) {
            assert_eq!(c.key, d.key);
            assert_eq!(c.quantity, -d.quantity);
        }
    }

    /// Create then delete is a no-op on every touched key
    #[test]
    fn test_create_delete_round_trip() {
        let key = StockKey::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let effect = income(key, dec("100"));

        let mut ledger = HashMap::new();
        apply(&mut ledger, &effect.deltas());
        apply(&mut ledger, &effect.inverse_deltas());

        assert_eq!(ledger[&key], Decimal::ZERO);
    }

    /// Two interleaved +5 events both take effect (delta-merge semantics)
    #[test]
    fn test_no_lost_update_merge() {
        let key = StockKey::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let a = income(key, dec("5"));
        let b = income(key, dec("5"));

        let mut ledger = HashMap::new();
        apply(&mut ledger, &a.deltas());
        apply(&mut ledger, &b.deltas());

        assert_eq!(ledger[&key], dec("10"));
    }

    /// The end-to-end scenario: income, transfer, write-off, then delete the
    /// transfer. Deletion is the exact inverse of creation, so the
    /// destination key legitimately goes negative.
    #[test]
    fn test_document_lifecycle_scenario() {
        let material = Uuid::new_v4();
        let d1 = Uuid::new_v4();
        let l1 = Uuid::new_v4();
        let d2 = Uuid::new_v4();
        let l2 = Uuid::new_v4();

        let source = StockKey::new(material, d1, l1);
        let dest = StockKey::new(material, d2, l2);

        let mut ledger = HashMap::new();

        let income_item = income(source, dec("100"));
        apply(&mut ledger, &income_item.deltas());
        assert_eq!(ledger[&source], dec("100"));

        let transfer_item = transfer(material, (d1, l1), (d2, l2), dec("30"));
        apply(&mut ledger, &transfer_item.deltas());
        assert_eq!(ledger[&source], dec("70"));
        assert_eq!(ledger[&dest], dec("30"));

        let writeoff_item = writeoff(dest, dec("10"));
        apply(&mut ledger, &writeoff_item.deltas());
        assert_eq!(ledger[&dest], dec("20"));

        apply(&mut ledger, &transfer_item.inverse_deltas());
        assert_eq!(ledger[&source], dec("100"));
        assert_eq!(ledger[&dest], dec("-10"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Final quantity on a single key equals the signed sum of all live items
    #[test]
    fn prop_signed_sum_invariant(
        quantities in prop::collection::vec(1u32..10_000, 1..20),
        deleted_mask in prop::collection::vec(any::<bool>(), 20),
        kinds in prop::collection::vec(any::<bool>(), 20),
    ) {
        let key = StockKey::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut ledger = HashMap::new();
        let mut expected = Decimal::ZERO;

        for (i, raw) in quantities.iter().enumerate() {
            let quantity = Decimal::from(*raw) / dec("100");
            let is_income = kinds[i % kinds.len()];
            let effect = if is_income {
                income(key, quantity)
            } else {
                writeoff(key, quantity)
            };

            apply(&mut ledger, &effect.deltas());

            if deleted_mask[i % deleted_mask.len()] {
                apply(&mut ledger, &effect.inverse_deltas());
            } else {
                expected += if is_income { quantity } else { -quantity };
            }
        }

        prop_assert_eq!(ledger[&key], expected);
    }

    /// Any transfer leaves the total over all keys unchanged
    #[test]
    fn prop_transfer_conservation(
        start in 1u32..100_000,
        moved in 1u32..100_000,
    ) {
        let material = Uuid::new_v4();
        let from = (Uuid::new_v4(), Uuid::new_v4());
        let to = (Uuid::new_v4(), Uuid::new_v4());
        let source = StockKey::new(material, from.0, from.1);

        let mut ledger = HashMap::new();
        apply(&mut ledger, &income(source, Decimal::from(start)).deltas());

        let before: Decimal = ledger.values().copied().sum();
        apply(&mut ledger, &transfer(material, from, to, Decimal::from(moved)).deltas());
        let after: Decimal = ledger.values().copied().sum();

        prop_assert_eq!(before, after);
    }

    /// Creating and deleting the same item is a no-op regardless of what
    /// happens in between
    #[test]
    fn prop_delete_inverts_create(
        quantity in 1u32..100_000,
        interleaved in prop::collection::vec(1u32..1_000, 0..10),
    ) {
        let key = StockKey::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let effect = income(key, Decimal::from(quantity));

        let mut with_item = HashMap::new();
        let mut without_item = HashMap::new();

        apply(&mut with_item, &effect.deltas());
        for q in &interleaved {
            let other = writeoff(key, Decimal::from(*q));
            apply(&mut with_item, &other.deltas());
            apply(&mut without_item, &other.deltas());
        }
        apply(&mut with_item, &effect.inverse_deltas());

        prop_assert_eq!(with_item[&key], without_item[&key]);
    }
}
