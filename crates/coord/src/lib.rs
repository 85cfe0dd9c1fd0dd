//! Compact coordinate record and SIMD pairwise-distance evaluator
//!
//! [CompactCoordinate] is deliberately exactly one 128-bit SIMD lane so that
//! four of them pack into a 512-bit cache line. [Evaluator] provides scalar,
//! 4-wide (SSE-class) and 8-wide (AVX-class) entry points over it; all three
//! are required to agree on the chosen bin for every pair (see
//! [Evaluator::evaluate_octo]), even though float rounding means the
//! intermediate distance can differ in its last bit.

mod evaluator;
mod record;

#[doc(inline)]
pub use evaluator::{Evaluated, EvaluatedRounded, Evaluator};

#[doc(inline)]
pub use record::CompactCoordinate;

/// Distances below this threshold are treated as coincident and binned to 0
pub const EPSILON: f32 = 1e-6;
