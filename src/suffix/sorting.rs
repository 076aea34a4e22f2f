//! Suffix sorting over the masked token stream
//!
//! Suffixes are compared by stem-level token-entry identity, a stable
//! total order assigned once per context, so stemmed and case-normalized
//! variants collapse to equal comparisons. Sorting is a plain comparison
//! sort: O(n² log n) in the worst case, which does not present any
//! substantial difference in efficiency at search-results scale, where n
//! is the total masked token count of one request.

use crate::preprocess::MaskedStream;

/// Build the suffix array: a permutation of all suffix-start positions,
/// sorted lexicographically by token id.
///
/// Every suffix ends in a unique boundary separator, so no suffix is a
/// prefix of another and the order is total — the result is deterministic
/// even with an unstable sort.
pub fn suffix_sort(stream: &MaskedStream) -> Vec<u32> {
    let ids: Vec<u32> = stream.tokens.iter().map(|t| t.id).collect();
    let mut suffix_array: Vec<u32> = (0..ids.len() as u32).collect();
    suffix_array.sort_unstable_by(|&a, &b| ids[a as usize..].cmp(&ids[b as usize..]));
    suffix_array
}
