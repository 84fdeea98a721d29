use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreapError {
    /// An inorder position past the end of the tree.
    #[error("position {pos} out of range for tree with {len} keys")]
    OutOfRange { pos: usize, len: usize },
    #[error("invalid rank range {start}..{end} for tree with {len} keys")]
    InvalidRange { start: usize, end: usize, len: usize },
    /// `join_exclusive` on trees whose key domains are not strictly ordered.
    #[error("joined trees overlap: left maximum is not below right minimum")]
    Overlap,
}

pub type Result<T, E = TreapError> = std::result::Result<T, E>;
