use thiserror::Error;

/// Conditions the ledger core can reject an operation with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transaction amount must be non-negative, got {0}")]
    InvalidTransaction(i64),

    /// An empty chain can never be authoritative.
    #[error("candidate chain is empty")]
    InvalidChain,

    #[error("unrecognized peer address: {0}")]
    InvalidPeer(String),
}
