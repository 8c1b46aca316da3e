use super::Transaction;

/// Transactions accepted but not yet sealed into a block.
///
/// Contents are all-or-nothing: callers append, and the sealing step moves
/// the whole pool into a block in one go. Nothing is ever removed
/// individually.
#[derive(Debug, Default)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Append a transaction, preserving arrival order.
    pub fn add(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    /// Atomically take the current contents, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
