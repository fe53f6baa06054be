//! Statistical text generation with smoothed n-gram models.
//!
//! This crate provides:
//! - Word-level n-gram models of any order, trained once from a corpus
//! - Additive (Lidstone) smoothing with backoff to shorter contexts
//! - Temperature and nucleus (top-p) sampling, reproducible from a seed
//! - Post-processing of generated tokens into readable prose
//!
//! ```no_run
//! use talker_core::{PredictionInput, Talker, TalkerConfig};
//!
//! let talker = Talker::builder()
//! 	.config(TalkerConfig { order: 4, ..TalkerConfig::default() })
//! 	.fit_files(&["texts/cats.txt", "texts/nlp.txt"])?;
//! let input = PredictionInput::new(50, Some(42), 0.9, 0.85)?;
//! println!("{}", talker.talk("Расскажи про котов", &input));
//! # Ok::<(), talker_core::TalkerError>(())
//! ```

/// N-gram counting, smoothing, sampling and the `Talker` interface.
pub mod model;

/// Segmentation, tokenization, morphology and post-processing.
pub mod text;

/// Training configuration.
pub mod config;

/// Error type shared by the crate.
pub mod error;

/// Corpus file loading.
///
/// Not exposed
pub(crate) mod io;

pub use config::{DistributionSupport, NucleusOrdering, TalkerConfig};
pub use error::TalkerError;
pub use model::generator::{Talker, TalkerBuilder};
pub use model::prediction_input::PredictionInput;
