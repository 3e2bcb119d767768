//! Contiguous subsequence search
//!
//! Deep-link reconciliation asks "is this chain of routes already open
//! somewhere on the stack?". Both helpers scan every valid window start, so
//! they are O(n·m); stacks are short enough that this never matters.

/// Index of the first element of the earliest window equal to `needle`
///
/// Returns `None` when `needle` is longer than `haystack` or absent. An empty
/// needle matches at every start, so the answer is `Some(0)`.
pub fn first_contiguous_index<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(0);
    }

    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Index of the last element of the latest window equal to `needle`
///
/// For a match starting at `i` this is `i + needle.len() - 1`, which for an
/// empty needle is the last index of `haystack`. Returns `None` when `needle`
/// is longer than `haystack`, absent, or both slices are empty.
pub fn last_contiguous_index<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return haystack.len().checked_sub(1);
    }

    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
        .map(|start| start + needle.len() - 1)
}
