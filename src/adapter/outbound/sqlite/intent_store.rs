//! SQLite intent store implementation.
//!
//! Intents and their transaction ledger. Ledger rows are append-only;
//! sequence numbers are derived from the current maximum at submit time.

use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    IntentRow, NewIntentRow, NewTxHistoryRow, TxHistoryRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    yield_suggestion_intent_tx_history as tx_history, yield_suggestion_intents,
};
use crate::adapter::outbound::sqlite::last_insert_rowid;
use crate::domain::{IntentStatus, TxHistoryEntry, TxStatus, YieldSuggestion, YieldSuggestionIntent};
use crate::error::{Error, Result};
use crate::port::outbound::store::IntentStore;

/// SQLite-backed store for intents and their ledger.
pub struct SqliteIntentStore {
    pool: DbPool,
}

impl SqliteIntentStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

#[async_trait]
impl IntentStore for SqliteIntentStore {
    async fn create_intent(
        &self,
        suggestion: &YieldSuggestion,
        wallet_address: &str,
        asset_amount: f64,
    ) -> Result<YieldSuggestionIntent> {
        let row = NewIntentRow {
            wallet_address: wallet_address.to_string(),
            yield_suggestion_id: suggestion.id,
            asset_amount,
            status: IntentStatus::New.as_i32(),
        };
        let mut conn = self.conn()?;

        let id = conn
            .transaction::<i32, diesel::result::Error, _>(|conn| {
                diesel::insert_into(yield_suggestion_intents::table)
                    .values(&row)
                    .execute(conn)?;
                diesel::select(last_insert_rowid()).get_result(conn)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(YieldSuggestionIntent {
            id,
            wallet_address: wallet_address.to_string(),
            suggestion_id: suggestion.id,
            asset_amount,
            status: IntentStatus::New,
        })
    }

    async fn intent(&self, id: i32) -> Result<Option<YieldSuggestionIntent>> {
        let mut conn = self.conn()?;

        let row: Option<IntentRow> = yield_suggestion_intents::table
            .find(id)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(YieldSuggestionIntent::try_from).transpose()
    }

    async fn intents_by_wallet(
        &self,
        wallet_address: &str,
        limit: i64,
    ) -> Result<Vec<YieldSuggestionIntent>> {
        let mut conn = self.conn()?;

        let rows: Vec<IntentRow> = yield_suggestion_intents::table
            .filter(yield_suggestion_intents::wallet_address.eq(wallet_address))
            .order(yield_suggestion_intents::id.desc())
            .limit(limit)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(YieldSuggestionIntent::try_from).collect()
    }

    async fn current_sequence_number(&self, intent: &YieldSuggestionIntent) -> Result<i32> {
        let mut conn = self.conn()?;

        let highest: Option<i32> = tx_history::table
            .filter(tx_history::wallet_address.eq(&intent.wallet_address))
            .filter(tx_history::yield_suggestion_intent_id.eq(intent.id))
            .select(max(tx_history::sequence_number))
            .first(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(highest.unwrap_or(0) + 1)
    }

    async fn insert_tx_history(
        &self,
        intent: &YieldSuggestionIntent,
        sequence_number: i32,
        tx_hash: &str,
        tx_status: TxStatus,
    ) -> Result<TxHistoryEntry> {
        let row = NewTxHistoryRow {
            wallet_address: intent.wallet_address.clone(),
            yield_suggestion_id: intent.suggestion_id,
            yield_suggestion_intent_id: intent.id,
            sequence_number,
            tx_hash: tx_hash.to_string(),
            tx_status: tx_status.as_i32(),
        };
        let mut conn = self.conn()?;

        let id = conn
            .transaction::<i32, diesel::result::Error, _>(|conn| {
                diesel::insert_into(tx_history::table)
                    .values(&row)
                    .execute(conn)?;
                diesel::select(last_insert_rowid()).get_result(conn)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(TxHistoryEntry {
            id,
            wallet_address: intent.wallet_address.clone(),
            suggestion_id: intent.suggestion_id,
            intent_id: intent.id,
            sequence_number,
            tx_hash: tx_hash.to_string(),
            tx_status,
        })
    }

    async fn tx_history_by_wallet(&self, wallet_address: &str) -> Result<Vec<TxHistoryEntry>> {
        let mut conn = self.conn()?;

        let rows: Vec<TxHistoryRow> = tx_history::table
            .filter(tx_history::wallet_address.eq(wallet_address))
            .order((
                tx_history::yield_suggestion_intent_id.asc(),
                tx_history::sequence_number.asc(),
            ))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(TxHistoryEntry::try_from).collect()
    }
}
