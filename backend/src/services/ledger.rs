//! Ledger update core
//!
//! Keeps the `stock_levels` aggregate consistent with line-item lifecycle
//! events. Document services call [`LedgerService::on_item_created`] exactly
//! once per successful item insert and [`LedgerService::on_item_deleted`]
//! exactly once per item removal, inside the same transaction as the item
//! row itself. Nothing else writes `stock_levels`.
//!
//! The ledger is a flat running sum, not an audit log: deletion applies the
//! exact inverse of the deltas creation applied, no matter what happened in
//! between. In-place item edits are not reconciled here; callers must delete
//! and recreate.

use sqlx::{Postgres, Transaction};

use crate::error::AppResult;
use crate::models::{ItemEffect, StockDelta};

/// Stock ledger reconciliation service
///
/// Stateless: it always operates inside the caller's transaction, so a
/// transfer's debit and credit apply atomically with the item row.
pub struct LedgerService;

impl LedgerService {
    /// React to a line-item creation: apply every delta the item implies
    pub async fn on_item_created(
        tx: &mut Transaction<'_, Postgres>,
        effect: &ItemEffect,
    ) -> AppResult<()> {
        for delta in effect.deltas() {
            Self::apply_delta(tx, &delta).await?;
        }
        Ok(())
    }

    /// React to a line-item deletion: apply the inverse of every creation delta
    pub async fn on_item_deleted(
        tx: &mut Transaction<'_, Postgres>,
        effect: &ItemEffect,
    ) -> AppResult<()> {
        for delta in effect.inverse_deltas() {
            Self::apply_delta(tx, &delta).await?;
        }
        Ok(())
    }

    /// Add a signed delta to one ledger row, creating it at 0 on first use
    ///
    /// A single atomic upsert: the database serializes concurrent increments
    /// to the same key via the row lock taken by ON CONFLICT DO UPDATE, so
    /// two simultaneous events cannot lose an update. No sufficiency check
    /// is made here; a bypassed caller contract can drive quantities
    /// negative.
    async fn apply_delta(
        tx: &mut Transaction<'_, Postgres>,
        delta: &StockDelta,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stock_levels (material_id, direction_id, location_id, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (material_id, direction_id, location_id)
            DO UPDATE SET quantity = stock_levels.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(delta.key.material_id)
        .bind(delta.key.direction_id)
        .bind(delta.key.location_id)
        .bind(delta.quantity)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
