use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

use super::PeerRegistry;
use crate::ledger::{Block, Ledger};

/// Chain snapshot as served by a peer's chain endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteChain {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Result of one consensus pass over the registered peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionOutcome {
    /// A longer valid peer chain was adopted.
    Replaced,
    /// No peer beat the local chain; it stands unchanged.
    Authoritative,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed chain response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fetches a peer's chain. Any failure makes the resolver skip that peer.
#[allow(async_fn_in_trait)]
pub trait ChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, FetchError>;
}

/// Production fetcher hitting each peer's chain route over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: reqwest::Client,
}

impl HttpChainFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("build reqwest client");
        Self { client }
    }
}

impl Default for HttpChainFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, FetchError> {
        let url = format!("http://{peer}/api/v1/chain/");
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Longest-valid-chain-wins reconciliation.
///
/// Any peer presenting a longer internally-valid chain is trusted; there is
/// no peer authentication and no Byzantine tolerance. That is the protocol
/// as designed, not a gap to close here.
#[derive(Debug)]
pub struct ConsensusResolver<F> {
    fetcher: F,
}

impl<F: ChainFetcher> ConsensusResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Query every registered peer and adopt the longest valid chain that
    /// beats the local length. Peers that fail to respond with a
    /// well-formed chain are skipped, as are peers whose reported length
    /// does not exceed the best seen so far.
    ///
    /// The ledger lock is released while peers are queried; the final
    /// replacement re-acquires it, so a local mutation that lands
    /// mid-resolution is overwritten (last writer wins).
    pub async fn resolve(
        &self,
        peers: &PeerRegistry,
        ledger: &Mutex<Ledger>,
    ) -> ResolutionOutcome {
        let mut current_max = ledger.lock().expect("mutex poisoned").len();
        let mut candidate: Option<Vec<Block>> = None;

        for peer in peers.iter() {
            let remote = match self.fetcher.fetch_chain(peer).await {
                Ok(remote) => remote,
                Err(err) => {
                    warn!("CONSENSUS - skipping peer {peer}: {err}");
                    continue;
                }
            };

            if remote.length <= current_max {
                debug!(
                    "CONSENSUS - peer {peer} chain is not longer ({} <= {current_max})",
                    remote.length
                );
                continue;
            }

            match Ledger::is_valid_chain(&remote.chain) {
                Ok(true) => {
                    debug!(
                        "CONSENSUS - peer {peer} leads with a valid chain of length {}",
                        remote.length
                    );
                    current_max = remote.length;
                    candidate = Some(remote.chain);
                }
                Ok(false) => warn!("CONSENSUS - peer {peer} sent an invalid chain, ignoring"),
                Err(err) => warn!("CONSENSUS - skipping peer {peer}: {err}"),
            }
        }

        match candidate {
            Some(chain) => {
                let mut ledger = ledger.lock().expect("mutex poisoned");
                info!(
                    "CONSENSUS - replacing local chain (length {} -> {})",
                    ledger.len(),
                    chain.len()
                );
                ledger.replace(chain);
                ResolutionOutcome::Replaced
            }
            None => ResolutionOutcome::Authoritative,
        }
    }
}
