use reqwest::Url;
use std::collections::BTreeSet;

use crate::error::LedgerError;

/// Known peer nodes, stored as normalized `host:port` authorities.
///
/// Equivalent spellings of the same peer (bare authority, full URL, URL
/// with a path) collapse to one entry, so repeated registration is
/// idempotent.
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    peers: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer given as `host:port` or a full URL. Only the
    /// normalized authority is kept.
    pub fn register(&mut self, address: &str) -> Result<(), LedgerError> {
        self.peers.insert(normalize(address)?);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.peers.iter().map(String::as_str)
    }

    pub fn addresses(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Reduce an address to its `host:port` authority, defaulting the scheme
/// so bare `host:port` forms parse too.
fn normalize(address: &str) -> Result<String, LedgerError> {
    let trimmed = address.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|_| LedgerError::InvalidPeer(address.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| LedgerError::InvalidPeer(address.to_string()))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::PeerRegistry;
    use crate::error::LedgerError;

    #[test]
    fn url_forms_normalize_to_the_authority() {
        let mut peers = PeerRegistry::new();
        peers.register("http://192.168.0.5:5000").unwrap();
        peers.register("http://192.168.0.5:5000/chain").unwrap();
        peers.register("192.168.0.5:5000").unwrap();

        assert_eq!(peers.addresses(), vec!["192.168.0.5:5000".to_string()]);
    }

    #[test]
    fn registration_is_idempotent() {
        let mut peers = PeerRegistry::new();
        peers.register("localhost:5001").unwrap();
        peers.register("localhost:5001").unwrap();
        assert_eq!(peers.len(), 1);
    }

    #[test]
    fn distinct_ports_are_distinct_peers() {
        let mut peers = PeerRegistry::new();
        peers.register("localhost:5001").unwrap();
        peers.register("localhost:5002").unwrap();
        assert_eq!(peers.len(), 2);
    }

    #[test]
    fn hosts_without_a_port_are_kept_bare() {
        let mut peers = PeerRegistry::new();
        peers.register("example.com").unwrap();
        assert_eq!(peers.addresses(), vec!["example.com".to_string()]);
    }

    #[test]
    fn unparseable_addresses_are_rejected() {
        let mut peers = PeerRegistry::new();
        let err = peers.register("").unwrap_err();
        assert_eq!(err, LedgerError::InvalidPeer(String::new()));
        assert!(peers.is_empty());
    }
}
