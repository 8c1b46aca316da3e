use actix_web::{HttpResponse, Responder, get, web};
use log::info;

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};
use crate::ledger::{Ledger, MINING_REWARD, MINING_SENDER, pow};

/// Get the full chain, in the same shape peers consume during consensus.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        length: ledger.len(),
        chain: &ledger.chain,
    })
}

/// Validate the local chain.
#[get("/chain/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: Ledger::is_valid_chain(&ledger.chain).unwrap_or(false),
        length: ledger.len(),
    })
}

/// Mine one block:
/// - solve proof-of-work against the last block's proof
/// - credit the flat reward to this node (sender `"0"`)
/// - seal the pool into a new block linked to the last block's hash
///
/// The ledger lock is held across the whole sequence so the sealed block
/// still extends the block whose proof seeded the search.
#[get("/mine/")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");

    let last_proof = ledger.last_block().proof;
    let proof = pow::solve(last_proof);

    ledger
        .add_transaction(
            MINING_SENDER.to_string(),
            state.node_id.clone(),
            MINING_REWARD,
        )
        .expect("reward amount is non-negative");

    let previous_hash = ledger.last_block().content_hash();
    let block = ledger.seal_block(proof, Some(previous_hash));

    info!(
        "MINER - sealed block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );

    HttpResponse::Ok().json(MineResponse {
        message: "New block sealed",
        index: block.index,
        transactions: &block.transactions,
        proof: block.proof,
        previous_hash: &block.previous_hash,
    })
}
