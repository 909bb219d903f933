//! LLM-powered insight generator.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::{InsightInput, InsightOutput};
use crate::error::{Error, Result};
use crate::port::outbound::{InsightGenerator, Llm};

/// Insight generator that prompts an [`Llm`] and parses the structured
/// JSON it returns.
pub struct LlmInsightGenerator {
    llm: Arc<dyn Llm>,
}

impl LlmInsightGenerator {
    #[must_use]
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    fn build_prompt(input: &InsightInput) -> Result<String> {
        let pools = serde_json::to_string_pretty(&input.pools)?;
        let contracts = serde_json::to_string_pretty(&input.contracts)?;
        let sentiment = input.sentiment.as_deref().unwrap_or("Unknown");
        let preferences = &input.preferences;

        Ok(format!(
            r#"You are a helpful AI assistant advising on DeFi yield strategies.

System time: {system_time}

User Preferences:
- Risk Tolerance: {risk_tolerance:?}
- Max Drawdown: {max_drawdown}
- Capital Size: {capital_size}
- Investment Timeframe: {investment_timeframe} days
- Asset: {asset_symbol}

Yield Pools:
{pools}

Market Sentiment:
{sentiment}

Smart Contract Info:
{contracts}

Instructions:
Please recommend the top pools and explain your decision.
Output a JSON with:
{{
  "recommendedPools": [...],
  "insight": "...",
  "actions": [
    {{
      "pool": "...",
      "function": "...",
      "contractAddress": "..."
    }}
  ]
}}
"#,
            system_time = Utc::now().to_rfc3339(),
            risk_tolerance = preferences.risk_tolerance,
            max_drawdown = preferences.max_drawdown,
            capital_size = preferences.capital_size,
            investment_timeframe = preferences.investment_timeframe.days(),
            asset_symbol = preferences.asset_symbol,
        ))
    }

    fn parse_response(response: &str) -> Result<InsightOutput> {
        let json = extract_json(response)?;
        serde_json::from_str(json)
            .map_err(|e| Error::Parse(format!("insight response was not valid JSON: {e}")))
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate(&self, input: &InsightInput) -> Result<InsightOutput> {
        let prompt = Self::build_prompt(input)?;
        let response = self.llm.complete(&prompt).await?;
        debug!(provider = self.llm.name(), "insight generation complete");
        Self::parse_response(&response)
    }
}

/// Extract a JSON object from a response that may wrap it in a markdown
/// code block or surrounding prose.
fn extract_json(text: &str) -> Result<&str> {
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        let end = text[start..]
            .find("```")
            .map(|i| start + i)
            .unwrap_or(text.len());
        Ok(text[start..end].trim())
    } else if let Some(start) = text.find('{') {
        let end = text.rfind('}').map(|i| i + 1).unwrap_or(text.len());
        Ok(&text[start..end])
    } else {
        Err(Error::Parse("no JSON found in response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Chain, InvestmentTimeframe, RiskTolerance, UserPreferences,
    };

    fn sample_input() -> InsightInput {
        InsightInput {
            preferences: UserPreferences {
                chain: Chain::Aptos,
                risk_tolerance: RiskTolerance::Low,
                max_drawdown: 0.1,
                capital_size: 1000.0,
                investment_timeframe: InvestmentTimeframe::Days30,
                asset_symbol: "APT".into(),
            },
            pools: vec![],
            sentiment: None,
            contracts: vec![],
        }
    }

    struct CannedLlm(String);

    #[async_trait]
    impl Llm for CannedLlm {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn prompt_carries_preferences_and_sentiment() {
        let mut input = sample_input();
        input.sentiment = Some("positive".into());

        let prompt = LlmInsightGenerator::build_prompt(&input).unwrap();
        assert!(prompt.contains("Risk Tolerance: Low"));
        assert!(prompt.contains("Investment Timeframe: 30 days"));
        assert!(prompt.contains("positive"));
    }

    #[test]
    fn missing_sentiment_renders_as_unknown() {
        let prompt = LlmInsightGenerator::build_prompt(&sample_input()).unwrap();
        assert!(prompt.contains("Unknown"));
    }

    #[tokio::test]
    async fn parses_bare_json_response() {
        let generator = LlmInsightGenerator::new(Arc::new(CannedLlm(
            r#"{"recommendedPools": ["pool-1"], "insight": "stake APT", "actions": []}"#.into(),
        )));

        let output = generator.generate(&sample_input()).await.unwrap();
        assert_eq!(output.recommended_pools, vec!["pool-1"]);
        assert_eq!(output.insight, "stake APT");
    }

    #[tokio::test]
    async fn parses_fenced_json_with_actions() {
        let response = r#"Here you go:
```json
{
  "recommendedPools": ["pool-1"],
  "insight": "lend on echelon",
  "actions": [
    {"pool": "pool-1", "function": "lend", "contractAddress": "0xabc"}
  ]
}
```"#;
        let generator = LlmInsightGenerator::new(Arc::new(CannedLlm(response.into())));

        let output = generator.generate(&sample_input()).await.unwrap();
        assert_eq!(output.actions.len(), 1);
        assert_eq!(output.actions[0].function, "lend");
        assert_eq!(output.actions[0].contract_address, "0xabc");
    }

    #[tokio::test]
    async fn non_json_response_is_a_hard_error() {
        let generator =
            LlmInsightGenerator::new(Arc::new(CannedLlm("I cannot help with that.".into())));

        assert!(generator.generate(&sample_input()).await.is_err());
    }

    #[test]
    fn actions_default_to_empty_when_absent() {
        let output = LlmInsightGenerator::parse_response(
            r#"{"recommendedPools": [], "insight": "sit tight"}"#,
        )
        .unwrap();
        assert!(output.actions.is_empty());
    }
}
