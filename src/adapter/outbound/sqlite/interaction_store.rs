//! SQLite interaction-catalog store implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::InteractionRow;
use crate::adapter::outbound::sqlite::database::schema::available_interactions;
use crate::domain::{AvailableInteraction, Chain};
use crate::error::{Error, Result};
use crate::port::outbound::store::InteractionStore;

/// SQLite-backed store for the interaction catalog.
pub struct SqliteInteractionStore {
    pool: DbPool,
}

impl SqliteInteractionStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

#[async_trait]
impl InteractionStore for SqliteInteractionStore {
    async fn upsert_interactions(&self, interactions: &[AvailableInteraction]) -> Result<usize> {
        if interactions.is_empty() {
            return Ok(0);
        }
        let rows: Vec<InteractionRow> = interactions.iter().map(InteractionRow::from).collect();
        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut written = 0;
            for row in &rows {
                written += diesel::insert_into(available_interactions::table)
                    .values(row)
                    .on_conflict((
                        available_interactions::chain,
                        available_interactions::project,
                        available_interactions::name,
                    ))
                    .do_update()
                    .set(available_interactions::args.eq(&row.args))
                    .execute(conn)?;
            }
            Ok(written)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn interactions(&self, chain: Chain) -> Result<Vec<AvailableInteraction>> {
        let mut conn = self.conn()?;

        let rows: Vec<InteractionRow> = available_interactions::table
            .filter(available_interactions::chain.eq(chain.as_i32()))
            .order((
                available_interactions::project.asc(),
                available_interactions::name.asc(),
            ))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(AvailableInteraction::try_from).collect()
    }

    async fn interactions_by_project(
        &self,
        chain: Chain,
        project: &str,
    ) -> Result<Vec<AvailableInteraction>> {
        let mut conn = self.conn()?;

        let rows: Vec<InteractionRow> = available_interactions::table
            .filter(available_interactions::chain.eq(chain.as_i32()))
            .filter(available_interactions::project.eq(project))
            .order(available_interactions::name.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(AvailableInteraction::try_from).collect()
    }
}
