use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};

use super::DIFFICULTY_PREFIX;

/// Check the difficulty predicate: the SHA-256 digest of the decimal
/// concatenation `"{last_proof}{proof}"` must start with four hex zeros.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest).starts_with(DIFFICULTY_PREFIX)
}

/// Brute-force the next proof by ascending search from 0.
///
/// Runs to completion; the search always terminates but has no bound on
/// wall-clock time. The returned nonce is the smallest that satisfies
/// `valid_proof`.
pub fn solve(last_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

/// Like `solve`, but checks `cancel` between attempts and returns `None`
/// once it is raised. The search order is unchanged, so a completed run
/// returns the same nonce `solve` would.
pub fn solve_cancellable(last_proof: u64, cancel: &AtomicBool) -> Option<u64> {
    let mut proof = 0u64;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        if valid_proof(last_proof, proof) {
            return Some(proof);
        }
        proof += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{solve, solve_cancellable, valid_proof};
    use std::sync::atomic::AtomicBool;

    #[test]
    fn solve_finds_the_smallest_valid_proof() {
        let proof = solve(100);
        assert!(valid_proof(100, proof));
        assert!((0..proof).all(|smaller| !valid_proof(100, smaller)));
    }

    #[test]
    fn solved_proofs_chain() {
        let first = solve(100);
        let second = solve(first);
        assert!(valid_proof(first, second));
    }

    #[test]
    fn cancellable_solve_matches_plain_solve() {
        let cancel = AtomicBool::new(false);
        assert_eq!(solve_cancellable(100, &cancel), Some(solve(100)));
    }

    #[test]
    fn raised_flag_stops_the_search() {
        let cancel = AtomicBool::new(true);
        assert_eq!(solve_cancellable(100, &cancel), None);
    }
}
