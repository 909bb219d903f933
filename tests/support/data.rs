use chrono::Utc;
use yieldscout::domain::{
    Chain, DataSource, EnrichedPool, InvestmentTimeframe, PoolYield, RiskTolerance,
    UserPreferences,
};

pub fn make_pool_yield(
    original_id: &str,
    symbol: &str,
    project: &str,
    apy: f64,
    tvl_usd: f64,
) -> PoolYield {
    PoolYield {
        original_id: original_id.into(),
        data_source: DataSource::Defillama,
        chain: Chain::Aptos,
        symbol: symbol.into(),
        project: project.into(),
        apy,
        apy_base: None,
        apy_base_7d: None,
        apy_mean_30d: None,
        apy_pct_1d: None,
        apy_pct_7d: None,
        apy_pct_30d: None,
        tvl_usd,
    }
}

pub fn make_enriched(pool: &str, sigma: Option<f64>, tvl_usd: f64) -> EnrichedPool {
    EnrichedPool {
        pool: pool.into(),
        timestamp: Utc::now(),
        project: "echelon".into(),
        chain: "Aptos".into(),
        symbol: "APT".into(),
        pool_meta: None,
        underlying_tokens: vec![],
        reward_tokens: None,
        tvl_usd,
        apy: 8.0,
        apy_base: None,
        apy_reward: None,
        il_7d: None,
        apy_base_7d: None,
        volume_usd_1d: None,
        volume_usd_7d: None,
        apy_base_inception: None,
        url: None,
        apy_pct_1d: None,
        apy_pct_7d: None,
        apy_pct_30d: None,
        apy_mean_30d: None,
        stablecoin: false,
        il_risk: "no".into(),
        exposure: "single".into(),
        return_value: None,
        count: None,
        apy_mean_expanding: None,
        apy_std_expanding: None,
        mu: None,
        sigma,
        outlier: false,
        project_factorized: None,
        chain_factorized: None,
        predicted_class: None,
        predicted_probability: None,
        binned_confidence: None,
        pool_old: None,
    }
}

pub fn make_preferences(risk_tolerance: RiskTolerance, capital_size: f64) -> UserPreferences {
    UserPreferences {
        chain: Chain::Aptos,
        risk_tolerance,
        max_drawdown: 0.1,
        capital_size,
        investment_timeframe: InvestmentTimeframe::Days30,
        asset_symbol: "APT".into(),
    }
}
