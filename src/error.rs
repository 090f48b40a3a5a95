use thiserror::Error;

use crate::entry::Key;

/// AvlError enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, Error, PartialEq)]
pub enum AvlError {
    /// Fatal case, balance factor of a node is outside {-1, 0, 1}.
    #[error("node {0} is unbalanced, balance factor {1}")]
    Unbalanced(Key, isize),
    /// Fatal case, stored height does not match the height computed from
    /// children. Carries (node, stored, computed).
    #[error("node {0} has height {1}, computed {2}")]
    HeightMismatch(Key, usize, usize),
    /// Fatal case, index entries are not in sort-order.
    #[error("sort error, {0} is not before {1}")]
    SortError(Key, Key),
    /// Fatal case, number of nodes does not match the entry count.
    /// Carries (counted, expected).
    #[error("found {0} nodes, expected {1}")]
    CountMismatch(usize, usize),
    /// Returned by load_from() API when key is already present.
    #[error("duplicate key {0}")]
    DuplicateKey(Key),
}
