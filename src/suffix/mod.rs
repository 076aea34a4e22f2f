//! Suffix-array based frequent phrase discovery
//!
//! Builds a generalized suffix array plus primary/secondary LCP arrays
//! over the concatenated, boundary-masked token stream, then enumerates
//! frequently repeated word sequences as cluster-label candidates.
//!
//! ## Submodules
//!
//! - [`sorting`] — suffix sorting by token-entry identity
//! - [`lcp`] — dual LCP arrays by direct pairwise comparison
//! - [`miner`] — LCP-interval enumeration into [`PhraseCandidate`]s

pub mod lcp;
pub mod miner;
pub mod sorting;

pub use lcp::{dual_lcp_suffix_sort, DualLcpSuffixArray};
pub use miner::{PhraseCandidate, PhraseMiner};
pub use sorting::suffix_sort;
