use log::debug;

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, pow};
use crate::error::LedgerError;
use crate::transaction::{Transaction, TransactionPool};

/// Append-only chain of blocks plus the pool of not-yet-sealed
/// transactions. One instance per node process.
#[derive(Debug)]
pub struct Ledger {
    pub chain: Vec<Block>,
    pool: TransactionPool,
}

impl Ledger {
    /// Initialize a ledger with its genesis block. The chain is never empty
    /// after this.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pool: TransactionPool::new(),
        };
        ledger.seal_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    /// The most recently appended block.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// The block takes `index = len + 1`, a creation-time timestamp, the
    /// entire pool contents, and `previous_hash` as given (or the last
    /// block's content hash when omitted). The pool is left empty.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash =
            previous_hash.unwrap_or_else(|| self.last_block().content_hash());
        let block = Block::new(
            self.chain.len() as u64 + 1,
            self.pool.drain(),
            proof,
            previous_hash,
        );
        debug!(
            "LEDGER - sealed block #{} ({} txs, proof={})",
            block.index,
            block.transactions.len(),
            block.proof
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Queue a transaction for the next sealed block. Returns the index of
    /// the block that will contain it (current length + 1). Inputs are
    /// assumed already type-checked by the transport layer; only the
    /// non-negative amount invariant is enforced here.
    pub fn add_transaction(
        &mut self,
        sender: String,
        recipient: String,
        amount: i64,
    ) -> Result<u64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidTransaction(amount));
        }
        self.pool.add(Transaction {
            sender,
            recipient,
            amount,
        });
        Ok(self.chain.len() as u64 + 1)
    }

    /// Transactions awaiting inclusion in the next block.
    pub fn pending(&self) -> &[Transaction] {
        self.pool.pending()
    }

    /// Walk a candidate chain pairwise from the second block, checking hash
    /// linkage and proof-of-work at every step. A single block is trivially
    /// valid; an empty candidate is a caller error.
    pub fn is_valid_chain(candidate: &[Block]) -> Result<bool, LedgerError> {
        let (first, rest) = candidate.split_first().ok_or(LedgerError::InvalidChain)?;

        let mut prev = first;
        for block in rest {
            if block.previous_hash != prev.content_hash() {
                return Ok(false);
            }
            if !pow::valid_proof(prev.proof, block.proof) {
                return Ok(false);
            }
            prev = block;
        }
        Ok(true)
    }

    /// Wholesale chain replacement. No checks of its own; callers run the
    /// length comparison and `is_valid_chain` first.
    pub fn replace(&mut self, candidate: Vec<Block>) {
        self.chain = candidate;
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::error::LedgerError;
    use crate::ledger::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, pow};
    use crate::transaction::Transaction;

    /// Extend a ledger by `n` properly mined blocks.
    fn grow(ledger: &mut Ledger, n: usize) {
        for _ in 0..n {
            let proof = pow::solve(ledger.last_block().proof);
            ledger.seal_block(proof, None);
        }
    }

    #[test]
    fn genesis_block_is_fixed() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);

        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, GENESIS_PROOF);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(genesis.transactions.is_empty());
    }

    #[test]
    fn add_transaction_returns_planned_index() {
        let mut ledger = Ledger::new();
        let index = ledger
            .add_transaction("alice".into(), "bob".into(), 5)
            .unwrap();
        assert_eq!(index, 2);

        // Still targets the same block until a seal happens.
        let index = ledger
            .add_transaction("bob".into(), "carol".into(), 3)
            .unwrap();
        assert_eq!(index, 2);

        grow(&mut ledger, 1);
        let index = ledger
            .add_transaction("carol".into(), "dave".into(), 1)
            .unwrap();
        assert_eq!(index, 3);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add_transaction("alice".into(), "bob".into(), -1)
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidTransaction(-1));
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn sealing_drains_the_pool_atomically() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("alice".into(), "bob".into(), 5)
            .unwrap();
        ledger
            .add_transaction("bob".into(), "carol".into(), 3)
            .unwrap();
        let pooled = ledger.pending().to_vec();

        let proof = pow::solve(ledger.last_block().proof);
        let sealed = ledger.seal_block(proof, None).clone();
        assert_eq!(sealed.transactions, pooled);
        assert!(ledger.pending().is_empty());

        // Late arrivals do not touch the already-sealed block.
        ledger
            .add_transaction("dave".into(), "erin".into(), 1)
            .unwrap();
        assert_eq!(ledger.chain[1].transactions, pooled);
    }

    #[test]
    fn mined_chain_validates() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("alice".into(), "bob".into(), 5)
            .unwrap();
        grow(&mut ledger, 3);
        assert_eq!(Ledger::is_valid_chain(&ledger.chain), Ok(true));
    }

    #[test]
    fn single_block_is_trivially_valid() {
        let ledger = Ledger::new();
        assert_eq!(Ledger::is_valid_chain(&ledger.chain), Ok(true));
    }

    #[test]
    fn empty_candidate_is_an_error() {
        assert_eq!(Ledger::is_valid_chain(&[]), Err(LedgerError::InvalidChain));
    }

    #[test]
    fn tampered_proof_invalidates_the_chain() {
        let mut ledger = Ledger::new();
        grow(&mut ledger, 2);
        ledger.chain[1].proof += 1;
        assert_eq!(Ledger::is_valid_chain(&ledger.chain), Ok(false));
    }

    #[test]
    fn tampered_linkage_invalidates_the_chain() {
        let mut ledger = Ledger::new();
        grow(&mut ledger, 2);
        ledger.chain[2].previous_hash = "forged".into();
        assert_eq!(Ledger::is_valid_chain(&ledger.chain), Ok(false));
    }

    #[test]
    fn tampered_transactions_invalidate_the_chain() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("alice".into(), "bob".into(), 5)
            .unwrap();
        grow(&mut ledger, 2);
        // Rewriting history changes block 2's content hash, breaking the
        // link recorded in block 3.
        ledger.chain[1].transactions.push(Transaction {
            sender: "mallory".into(),
            recipient: "mallory".into(),
            amount: 1_000,
        });
        assert_eq!(Ledger::is_valid_chain(&ledger.chain), Ok(false));
    }

    #[test]
    fn replace_overwrites_the_chain() {
        let mut a = Ledger::new();
        let mut b = Ledger::new();
        grow(&mut b, 2);

        a.replace(b.chain.clone());
        assert_eq!(a.len(), 3);
        assert_eq!(
            a.last_block().content_hash(),
            b.last_block().content_hash()
        );
    }

    #[test]
    fn mine_one_block_end_to_end() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("0".into(), "minerX".into(), 1)
            .unwrap();
        ledger.seal_block(pow::solve(100), None);

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.chain[1].transactions,
            vec![Transaction {
                sender: "0".into(),
                recipient: "minerX".into(),
                amount: 1,
            }]
        );
        assert_eq!(Ledger::is_valid_chain(&ledger.chain), Ok(true));
    }
}
