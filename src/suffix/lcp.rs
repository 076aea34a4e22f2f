//! Dual LCP computation
//!
//! LCP values are computed by direct pairwise comparison of adjacent
//! suffixes, O(n²) worst case — correctness and simplicity dominate at the
//! corpus sizes this system targets; no linear-time construction is
//! needed.
//!
//! Two arrays accompany every suffix array:
//!
//! - the **primary** LCP compares stem-level token ids, matching the sort
//!   order;
//! - the **secondary** LCP additionally requires the field-variant code to
//!   match, separating a phrase occurring in a title from the same phrase
//!   occurring in a snippet.
//!
//! Boundary separators have unique ids, so no LCP value ever extends
//! across a document or field boundary.

use crate::preprocess::MaskedStream;
use crate::suffix::sorting::suffix_sort;

/// A suffix array with its primary and secondary LCP arrays.
///
/// `lcp[i]` is the longest common prefix of the suffixes at
/// `suffix_array[i - 1]` and `suffix_array[i]`; `lcp[0]` is 0.
#[derive(Debug, Clone)]
pub struct DualLcpSuffixArray {
    pub suffix_array: Vec<u32>,
    pub lcp: Vec<u32>,
    pub secondary_lcp: Vec<u32>,
}

/// LCP suffix-sort the masked stream, producing both LCP arrays.
pub fn dual_lcp_suffix_sort(stream: &MaskedStream) -> DualLcpSuffixArray {
    let suffix_array = suffix_sort(stream);
    let lcp = pairwise_lcp(stream, &suffix_array, false);
    let secondary_lcp = pairwise_lcp(stream, &suffix_array, true);
    DualLcpSuffixArray {
        suffix_array,
        lcp,
        secondary_lcp,
    }
}

/// Direct pairwise LCP of lexicographically adjacent suffixes.
fn pairwise_lcp(stream: &MaskedStream, suffix_array: &[u32], with_variant: bool) -> Vec<u32> {
    let tokens = &stream.tokens;
    let n = suffix_array.len();
    let mut lcp = vec![0u32; n];

    for i in 1..n {
        let a = suffix_array[i - 1] as usize;
        let b = suffix_array[i] as usize;
        let mut len = 0usize;
        while a + len < n && b + len < n {
            let x = &tokens[a + len];
            let y = &tokens[b + len];
            if x.id != y.id || (with_variant && x.variant != y.variant) {
                break;
            }
            len += 1;
        }
        lcp[i] = len as u32;
    }

    lcp
}
