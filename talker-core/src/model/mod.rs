//! N-gram language model and generation.
//!
//! - Per-context continuation counts (`State`)
//! - Multi-order counting (`counter`)
//! - Smoothed model with backoff lookup (`NGramModel`)
//! - Next-token sampling (`SamplingStrategy`, `NucleusSampling`)
//! - Call parameters (`PredictionInput`)
//! - The high-level generation interface (`Talker`)

/// High-level interface: training from corpus files or lines, and `talk`.
pub mod generator;

/// Counting of context → next-token frequencies for orders 1..N.
pub mod counter;

/// Smoothed variable-order model and backoff lookup.
pub mod ngram_model;

/// Ordered continuation counts of a single context.
pub mod state;

/// Temperature and nucleus sampling.
pub mod sampling;

/// Validated parameters of one generation call.
pub mod prediction_input;
