//! Diesel schema definitions for the SQLite store.

diesel::table! {
    pool_yields (id) {
        id -> Integer,
        timestamp -> Text,
        original_id -> Text,
        data_source -> Integer,
        chain -> Integer,
        symbol -> Text,
        project -> Text,
        apy -> Double,
        apy_base -> Nullable<Double>,
        apy_base_7d -> Nullable<Double>,
        apy_mean_30d -> Nullable<Double>,
        apy_pct_1d -> Nullable<Double>,
        apy_pct_7d -> Nullable<Double>,
        apy_pct_30d -> Nullable<Double>,
        tvl_usd -> Double,
    }
}

diesel::table! {
    defillama_enriched_pools (pool) {
        pool -> Text,
        timestamp -> Text,
        project -> Text,
        chain -> Text,
        symbol -> Text,
        pool_meta -> Nullable<Text>,
        underlying_tokens -> Text,
        reward_tokens -> Nullable<Text>,
        tvl_usd -> Double,
        apy -> Double,
        apy_base -> Nullable<Double>,
        apy_reward -> Nullable<Double>,
        il_7d -> Nullable<Double>,
        apy_base_7d -> Nullable<Double>,
        volume_usd_1d -> Nullable<Double>,
        volume_usd_7d -> Nullable<Double>,
        apy_base_inception -> Nullable<Double>,
        url -> Nullable<Text>,
        apy_pct_1d -> Nullable<Double>,
        apy_pct_7d -> Nullable<Double>,
        apy_pct_30d -> Nullable<Double>,
        apy_mean_30d -> Nullable<Double>,
        stablecoin -> Bool,
        il_risk -> Text,
        exposure -> Text,
        return_value -> Nullable<Double>,
        count -> Nullable<Integer>,
        apy_mean_expanding -> Nullable<Double>,
        apy_std_expanding -> Nullable<Double>,
        mu -> Nullable<Double>,
        sigma -> Nullable<Double>,
        outlier -> Bool,
        project_factorized -> Nullable<Integer>,
        chain_factorized -> Nullable<Integer>,
        predicted_class -> Nullable<Text>,
        predicted_probability -> Nullable<Double>,
        binned_confidence -> Nullable<Double>,
        pool_old -> Nullable<Text>,
    }
}

diesel::table! {
    yield_suggestions (id) {
        id -> Integer,
        timestamp -> Text,
        insight -> Text,
        is_actionable -> Bool,
        symbol -> Text,
        investment_timeframe -> Integer,
        risk_tolerance -> Integer,
        chain -> Integer,
        project -> Text,
        original_id -> Text,
        data_source -> Integer,
    }
}

diesel::table! {
    yield_actions (id) {
        id -> Integer,
        yield_suggestion_id -> Integer,
        sequence_number -> Integer,
        title -> Text,
        description -> Text,
        action_type -> Integer,
    }
}

diesel::table! {
    yield_suggestion_intents (id) {
        id -> Integer,
        wallet_address -> Text,
        yield_suggestion_id -> Integer,
        asset_amount -> Double,
        status -> Integer,
    }
}

diesel::table! {
    yield_suggestion_intent_tx_history (id) {
        id -> Integer,
        wallet_address -> Text,
        yield_suggestion_id -> Integer,
        yield_suggestion_intent_id -> Integer,
        sequence_number -> Integer,
        tx_hash -> Text,
        tx_status -> Integer,
    }
}

diesel::table! {
    available_interactions (chain, project, name) {
        chain -> Integer,
        project -> Text,
        name -> Text,
        args -> Text,
    }
}

diesel::joinable!(yield_actions -> yield_suggestions (yield_suggestion_id));
diesel::joinable!(yield_suggestion_intents -> yield_suggestions (yield_suggestion_id));

diesel::allow_tables_to_appear_in_same_query!(
    pool_yields,
    defillama_enriched_pools,
    yield_suggestions,
    yield_actions,
    yield_suggestion_intents,
    yield_suggestion_intent_tx_history,
    available_interactions,
);
