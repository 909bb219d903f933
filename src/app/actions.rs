//! Deterministic action derivation for suggestions.
//!
//! The catalog is a fixed lookup built at startup; derivation never
//! consults the network. Unknown combinations produce no actions, which
//! callers treat as "not actionable" rather than an error.

use std::collections::HashMap;

use crate::domain::{ActionType, Chain, DataSource, NewYieldAction, YieldSuggestion};

/// One step template in the catalog, sequenced at derivation time.
#[derive(Debug, Clone)]
struct ActionTemplate {
    title: &'static str,
    description: &'static str,
    action_type: ActionType,
}

/// Immutable `(chain, symbol, project)` to action-template lookup.
pub struct ActionCatalog {
    templates: HashMap<(Chain, String, String), Vec<ActionTemplate>>,
}

impl Default for ActionCatalog {
    fn default() -> Self {
        let lend_apt = vec![ActionTemplate {
            title: "lend",
            description: "lend APT",
            action_type: ActionType::Stake,
        }];

        let mut templates = HashMap::new();
        templates.insert(
            (Chain::Aptos, "APT".to_string(), "echelon".to_string()),
            lend_apt.clone(),
        );
        templates.insert(
            (Chain::Aptos, "APT".to_string(), "amnis".to_string()),
            lend_apt,
        );

        Self { templates }
    }
}

impl ActionCatalog {
    /// Derive the ordered action list for a suggestion. Sequence numbers
    /// start at 1.
    #[must_use]
    pub fn derive(&self, suggestion: &YieldSuggestion) -> Vec<NewYieldAction> {
        if suggestion.data_source != DataSource::Defillama {
            return Vec::new();
        }

        let key = (
            suggestion.chain,
            suggestion.symbol.clone(),
            suggestion.project.clone(),
        );
        let Some(templates) = self.templates.get(&key) else {
            return Vec::new();
        };

        templates
            .iter()
            .enumerate()
            .map(|(i, template)| NewYieldAction {
                suggestion_id: suggestion.id,
                sequence_number: i32::try_from(i).unwrap_or(i32::MAX - 1) + 1,
                title: template.title.to_string(),
                description: template.description.to_string(),
                action_type: template.action_type,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InvestmentTimeframe, RiskTolerance};
    use chrono::Utc;

    fn suggestion(project: &str, symbol: &str, data_source: DataSource) -> YieldSuggestion {
        YieldSuggestion {
            id: 7,
            timestamp: Utc::now(),
            insight: "stake it".into(),
            is_actionable: true,
            symbol: symbol.into(),
            investment_timeframe: InvestmentTimeframe::Days30,
            risk_tolerance: RiskTolerance::Low,
            chain: Chain::Aptos,
            project: project.into(),
            original_id: "pool-1".into(),
            data_source,
        }
    }

    #[test]
    fn echelon_apt_derives_single_lend_stake() {
        let catalog = ActionCatalog::default();
        let actions = catalog.derive(&suggestion("echelon", "APT", DataSource::Defillama));

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].sequence_number, 1);
        assert_eq!(actions[0].title, "lend");
        assert_eq!(actions[0].action_type, ActionType::Stake);
        assert_eq!(actions[0].suggestion_id, 7);
    }

    #[test]
    fn amnis_apt_is_also_actionable() {
        let catalog = ActionCatalog::default();
        let actions = catalog.derive(&suggestion("amnis", "APT", DataSource::Defillama));
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn unknown_project_derives_nothing() {
        let catalog = ActionCatalog::default();
        assert!(catalog
            .derive(&suggestion("thala", "APT", DataSource::Defillama))
            .is_empty());
    }

    #[test]
    fn unknown_symbol_derives_nothing() {
        let catalog = ActionCatalog::default();
        assert!(catalog
            .derive(&suggestion("echelon", "USDC", DataSource::Defillama))
            .is_empty());
    }

    #[test]
    fn non_defillama_suggestions_derive_nothing() {
        let catalog = ActionCatalog::default();
        assert!(catalog
            .derive(&suggestion("echelon", "APT", DataSource::Unknown))
            .is_empty());
    }
}
