//! Catalog of on-chain interactions the service knows how to build
//! transactions for.

use serde::{Deserialize, Serialize};

use super::chain::Chain;

/// One supported (chain, project) interaction, with an opaque argument
/// schema string. Upserted idempotently keyed by `(chain, project, name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableInteraction {
    pub chain: Chain,
    pub project: String,
    pub name: String,
    pub args: String,
}
