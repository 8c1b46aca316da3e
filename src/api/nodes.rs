use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};

/// Register a batch of peer addresses. Equivalent spellings of the same
/// authority collapse into one registry entry.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("nodes list must not be empty");
    }

    let mut peers = state.peers.lock().expect("mutex poisoned");
    for address in &body.nodes {
        if let Err(err) = peers.register(address) {
            warn!("NODES - rejected {address}: {err}");
            return HttpResponse::BadRequest().body(err.to_string());
        }
    }

    info!("NODES - registry now holds {} peer(s)", peers.len());
    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New peers have been added",
        total_nodes: peers.addresses(),
    })
}

/// Run one consensus pass against the registered peers and report whether
/// the local chain was replaced or stands authoritative.
#[get("/nodes/resolve/")]
pub async fn resolve(state: web::Data<AppState>) -> impl Responder {
    // Snapshot the registry so the peers lock is not held across fetches.
    let peers = state.peers.lock().expect("mutex poisoned").clone();

    let outcome = state.resolver.resolve(&peers, &state.ledger).await;

    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ResolveResponse {
        outcome,
        length: ledger.len(),
        chain: &ledger.chain,
    })
}
