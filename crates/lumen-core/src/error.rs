use thiserror::Error;

/// Errors surfaced while constructing kernel programs.
///
/// These cover data-driven failures (shapes that cannot be combined).
/// Contract violations such as an unaligned vectorized extent are
/// asserted at the call site instead of reported here.
#[derive(Debug, Error)]
pub enum LumenError {
    #[error("unsupported rank {rank} for {op}: expected {expected}")]
    UnsupportedRank {
        op: &'static str,
        rank: usize,
        expected: &'static str,
    },

    #[error("matmul inner dimensions do not match: lhs is [.., {m}, {k_lhs}], rhs is [.., {k_rhs}, {n}]")]
    MatmulDimMismatch {
        m: usize,
        k_lhs: usize,
        k_rhs: usize,
        n: usize,
    },

    #[error("batch extents {lhs} and {rhs} are not broadcast-compatible")]
    BatchMismatch { lhs: usize, rhs: usize },

    #[error("shapes {lhs} and {rhs} are not broadcast-compatible")]
    Broadcast { lhs: String, rhs: String },
}
