use serde::{Deserialize, Serialize};

/// A transfer of `amount` from `sender` to `recipient`.
///
/// Identifiers are opaque strings; `sender == "0"` marks a mining reward
/// minted by the node itself. No balance or signature checking happens
/// anywhere in the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}
