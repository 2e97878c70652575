//! Access-token verification and trust-level evaluation.

pub mod evaluator;

pub use evaluator::AccessEvaluator;
