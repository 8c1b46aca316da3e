pub mod peers;
pub mod resolver;

pub use peers::PeerRegistry;
pub use resolver::{
    ChainFetcher, ConsensusResolver, FetchError, HttpChainFetcher, RemoteChain,
    ResolutionOutcome,
};
