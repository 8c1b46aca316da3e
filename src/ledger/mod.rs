pub mod block;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::Ledger;

/// Proof seeded into the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender marker for mining rewards.
pub const MINING_SENDER: &str = "0";

/// Flat reward credited to the miner for each sealed block.
pub const MINING_REWARD: i64 = 1;

/// A proof digest must start with this prefix (fixed difficulty).
pub const DIFFICULTY_PREFIX: &str = "0000";
