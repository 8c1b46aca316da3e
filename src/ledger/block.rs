use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// A single immutable block in the ledger holding a batch of transactions.
///
/// `index` is 1-based; `previous_hash` is the content hash of the block
/// before it (or the genesis sentinel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC), fixed at creation
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create a block stamped with the current time. All fields are fixed
    /// for the object's lifetime.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: Utc::now().timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Compute the SHA-256 hash of this block's canonical JSON form.
    ///
    /// Serialization routes through `serde_json::Value`, whose maps emit
    /// keys in sorted order, so the digest is independent of struct field
    /// layout. Two blocks with identical field values always hash
    /// identically.
    pub fn content_hash(&self) -> String {
        let value = serde_json::to_value(self).expect("serialize block");
        let canonical = serde_json::to_string(&value).expect("render block json");
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)
    }
}
