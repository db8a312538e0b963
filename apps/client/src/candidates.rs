//! The fixed set of queries the relay sends, each paired with the count the
//! reference corpus (`gs://dataflow-samples/shakespeare/`) yields for it.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub query: &'static str,
    pub expected_count: u64,
}

pub const CANDIDATES: [Candidate; 4] = [
    Candidate {
        query: "hello",
        expected_count: 349,
    },
    Candidate {
        query: "world",
        expected_count: 728,
    },
    Candidate {
        query: "to be, or not to be",
        expected_count: 1,
    },
    Candidate {
        query: "insolence",
        expected_count: 14,
    },
];

/// Picks a candidate uniformly at random.
pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Candidate {
    CANDIDATES[rng.random_range(0..CANDIDATES.len())]
}
