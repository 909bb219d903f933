//! SQLite suggestion store implementation.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    NewYieldActionRow, NewYieldSuggestionRow, YieldActionRow, YieldSuggestionRow,
};
use crate::adapter::outbound::sqlite::database::schema::{yield_actions, yield_suggestions};
use crate::adapter::outbound::sqlite::last_insert_rowid;
use crate::domain::{NewYieldAction, NewYieldSuggestion, YieldAction, YieldSuggestion};
use crate::error::{Error, Result};
use crate::port::outbound::store::SuggestionStore;

/// SQLite-backed store for suggestions and their actions.
pub struct SqliteSuggestionStore {
    pool: DbPool,
}

impl SqliteSuggestionStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

#[async_trait]
impl SuggestionStore for SqliteSuggestionStore {
    async fn insert_suggestion(&self, suggestion: &NewYieldSuggestion) -> Result<YieldSuggestion> {
        let row = NewYieldSuggestionRow::from(suggestion);
        let mut conn = self.conn()?;

        let id = conn
            .transaction::<i32, diesel::result::Error, _>(|conn| {
                diesel::insert_into(yield_suggestions::table)
                    .values(&row)
                    .execute(conn)?;
                diesel::select(last_insert_rowid()).get_result(conn)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(YieldSuggestion {
            id,
            timestamp: suggestion.timestamp,
            insight: suggestion.insight.clone(),
            is_actionable: suggestion.is_actionable,
            symbol: suggestion.symbol.clone(),
            investment_timeframe: suggestion.investment_timeframe,
            risk_tolerance: suggestion.risk_tolerance,
            chain: suggestion.chain,
            project: suggestion.project.clone(),
            original_id: suggestion.original_id.clone(),
            data_source: suggestion.data_source,
        })
    }

    async fn suggestions(&self) -> Result<Vec<YieldSuggestion>> {
        let mut conn = self.conn()?;

        let rows: Vec<YieldSuggestionRow> = yield_suggestions::table
            .order(yield_suggestions::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(YieldSuggestion::try_from).collect()
    }

    async fn suggestion(&self, id: i32) -> Result<Option<YieldSuggestion>> {
        let mut conn = self.conn()?;

        let row: Option<YieldSuggestionRow> = yield_suggestions::table
            .find(id)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(YieldSuggestion::try_from).transpose()
    }

    async fn latest_suggestions(&self, lookback: Duration) -> Result<Vec<YieldSuggestion>> {
        let cutoff = (Utc::now() - lookback).to_rfc3339();
        let mut conn = self.conn()?;

        let rows: Vec<YieldSuggestionRow> = yield_suggestions::table
            .filter(yield_suggestions::timestamp.gt(&cutoff))
            .order((yield_suggestions::timestamp.desc(), yield_suggestions::id.desc()))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        // Newest-first order means the first row seen per partition wins.
        let mut seen = HashSet::new();
        rows.into_iter()
            .filter(|row| {
                seen.insert((
                    row.symbol.clone(),
                    row.risk_tolerance,
                    row.investment_timeframe,
                ))
            })
            .map(YieldSuggestion::try_from)
            .collect()
    }

    async fn insert_actions(&self, actions: &[NewYieldAction]) -> Result<usize> {
        if actions.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewYieldActionRow> = actions.iter().map(NewYieldActionRow::from).collect();
        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut written = 0;
            for row in &rows {
                written += diesel::insert_into(yield_actions::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(written)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn actions_by_suggestion(&self, suggestion_id: i32) -> Result<Vec<YieldAction>> {
        let mut conn = self.conn()?;

        let rows: Vec<YieldActionRow> = yield_actions::table
            .filter(yield_actions::yield_suggestion_id.eq(suggestion_id))
            .order(yield_actions::sequence_number.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(YieldAction::try_from).collect()
    }
}
