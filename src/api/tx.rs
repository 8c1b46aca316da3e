use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Submit a transaction into the pool for the next sealed block.
/// Field presence and types are enforced by the JSON extractor; the core
/// only rejects negative amounts.
#[post("/transactions/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let req = body.into_inner();

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.add_transaction(req.sender, req.recipient, req.amount) {
        Ok(index) => {
            info!("TX - accepted, planned for block #{index}");
            HttpResponse::Created().json(NewTxResponse {
                message: format!("Transaction will be added to block {index}"),
                index,
            })
        }
        Err(err) => {
            warn!("TX - rejected: {err}");
            HttpResponse::BadRequest().body(err.to_string())
        }
    }
}

/// List transactions awaiting the next seal.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let pending = ledger.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: pending.len(),
        transactions: pending,
    })
}
