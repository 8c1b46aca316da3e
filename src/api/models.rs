use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

use crate::consensus::{ConsensusResolver, HttpChainFetcher, PeerRegistry, ResolutionOutcome};
use crate::ledger::{Block, Ledger};
use crate::transaction::Transaction;

/// Shared application state: one ledger and one peer set per node process.
///
/// All mutating ledger operations go through the single `ledger` mutex, so
/// sealing (read last block, drain pool, append) is atomic with respect to
/// transaction submission and chain replacement.
pub struct AppState {
    /// Reward recipient identity for this node.
    pub node_id: String,
    pub ledger: Mutex<Ledger>,
    pub peers: Mutex<PeerRegistry>,
    pub resolver: ConsensusResolver<HttpChainFetcher>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            node_id: Uuid::new_v4().to_string(),
            ledger: Mutex::new(Ledger::new()),
            peers: Mutex::new(PeerRegistry::new()),
            resolver: ConsensusResolver::new(HttpChainFetcher::new()),
        }
    }
}

/* ---------- Chain API Models ---------- */

/// Also the peer-to-peer wire format consumed during consensus.
#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse<'a> {
    pub message: &'static str,
    pub index: u64,
    pub transactions: &'a [Transaction],
    pub proof: u64,
    pub previous_hash: &'a str,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse<'a> {
    pub outcome: ResolutionOutcome,
    pub length: usize,
    pub chain: &'a [Block],
}
