//! SQLite pool-yield store implementation.
//!
//! Persists pool-yield observations and enriched pool metadata and serves
//! the qualification queries over them.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::warn;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    EnrichedPoolRow, NewPoolYieldRow, PoolYieldRow,
};
use crate::adapter::outbound::sqlite::database::schema::{defillama_enriched_pools, pool_yields};
use crate::domain::{Chain, DataSource, EnrichedPool, PoolYield};
use crate::error::{Error, Result};
use crate::port::outbound::store::{PoolYieldStore, QualifiedPoolQuery};

/// SQLite-backed pool-yield store.
pub struct SqlitePoolYieldStore {
    pool: DbPool,
}

impl SqlitePoolYieldStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    fn try_upsert_pool_yields(&self, yields: &[PoolYield]) -> Result<usize> {
        let observed_at = Utc::now();
        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut written = 0;
            for pool_yield in yields {
                let row = NewPoolYieldRow::from_domain(pool_yield, observed_at);
                written += diesel::insert_into(pool_yields::table)
                    .values(&row)
                    .on_conflict((pool_yields::original_id, pool_yields::data_source))
                    .do_update()
                    .set(&row)
                    .execute(conn)?;
            }
            Ok(written)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    fn try_upsert_enriched_pools(&self, pools: &[EnrichedPool]) -> Result<usize> {
        let rows = pools
            .iter()
            .map(EnrichedPoolRow::from_domain)
            .collect::<Result<Vec<_>>>()?;
        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut written = 0;
            for row in &rows {
                written += diesel::insert_into(defillama_enriched_pools::table)
                    .values(row)
                    .on_conflict(defillama_enriched_pools::pool)
                    .do_update()
                    .set(row)
                    .execute(conn)?;
            }
            Ok(written)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }
}

#[async_trait]
impl PoolYieldStore for SqlitePoolYieldStore {
    async fn upsert_pool_yields(&self, yields: &[PoolYield]) -> usize {
        if yields.is_empty() {
            return 0;
        }
        match self.try_upsert_pool_yields(yields) {
            Ok(written) => written,
            Err(err) => {
                warn!(error = %err, "failed to upsert pool yields");
                0
            }
        }
    }

    async fn upsert_enriched_pools(&self, pools: &[EnrichedPool]) -> usize {
        if pools.is_empty() {
            return 0;
        }
        match self.try_upsert_enriched_pools(pools) {
            Ok(written) => written,
            Err(err) => {
                warn!(error = %err, "failed to upsert enriched pools");
                0
            }
        }
    }

    async fn top_apy_pool_yields(
        &self,
        chain: Chain,
        min_tvl_usd: f64,
        limit: i64,
    ) -> Result<Vec<PoolYield>> {
        let mut conn = self.conn()?;

        let rows: Vec<PoolYieldRow> = pool_yields::table
            .filter(pool_yields::chain.eq(chain.as_i32()))
            .filter(pool_yields::apy.gt(0.0))
            .filter(pool_yields::tvl_usd.gt(min_tvl_usd))
            .order(pool_yields::apy.desc())
            .limit(limit)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(PoolYield::try_from).collect()
    }

    async fn qualified_pool_yields(&self, query: &QualifiedPoolQuery) -> Result<Vec<PoolYield>> {
        let mut conn = self.conn()?;

        // SQLite LIKE is case-insensitive for ASCII, so the symbol
        // substring match happens after the load instead.
        let rows: Vec<PoolYieldRow> = pool_yields::table
            .inner_join(
                defillama_enriched_pools::table
                    .on(defillama_enriched_pools::pool.eq(pool_yields::original_id)),
            )
            .filter(pool_yields::chain.eq(query.chain.as_i32()))
            .filter(pool_yields::data_source.eq(DataSource::Defillama.as_i32()))
            .filter(pool_yields::apy.gt(0.0))
            .filter(pool_yields::tvl_usd.gt(query.asset_value_usd * 100.0))
            .filter(defillama_enriched_pools::sigma.lt(query.risk_tolerance.max_sigma()))
            .order(pool_yields::apy.desc())
            .select(PoolYieldRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        rows.into_iter()
            .map(PoolYield::try_from)
            .filter(|result| match result {
                Ok(pool_yield) => pool_yield.symbol.contains(&query.asset_symbol),
                Err(_) => true,
            })
            .take(limit)
            .collect()
    }

    async fn best_pool_yield_by_asset(&self, chain: Chain) -> Result<Vec<PoolYield>> {
        let mut conn = self.conn()?;

        let rows: Vec<PoolYieldRow> = pool_yields::table
            .filter(pool_yields::chain.eq(chain.as_i32()))
            .filter(pool_yields::apy.gt(0.0))
            .order((pool_yields::symbol.asc(), pool_yields::apy.desc()))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        // First row per symbol in (symbol asc, apy desc) order is the best
        // pool for that asset.
        let mut seen = HashSet::new();
        rows.into_iter()
            .filter(|row| seen.insert(row.symbol.clone()))
            .map(PoolYield::try_from)
            .collect()
    }
}
