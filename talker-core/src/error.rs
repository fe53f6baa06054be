use thiserror::Error;

/// Errors raised while configuring, training or querying a `Talker`.
#[derive(Debug, Error)]
pub enum TalkerError {
	#[error("n-gram order must be >= 1, got {0}")]
	InvalidOrder(usize),
	#[error("smoothing strength must be a finite value > 0, got {0}")]
	InvalidSmoothing(f64),
	#[error("vocabulary is empty (corpus is empty or has no tokens)")]
	EmptyVocabulary,
	#[error("temperature must be a finite value > 0, got {0}")]
	InvalidTemperature(f64),
	#[error("top_p must be in (0, 1], got {0}")]
	InvalidTopP(f64),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("RON error: {0}")]
	Ron(#[from] ron::error::SpannedError),
}
