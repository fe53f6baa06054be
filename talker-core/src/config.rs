use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TalkerError;

/// Order in which the nucleus cutoff walks a distribution.
///
/// - `Insertion`: the distribution's own order (observed continuations first,
///   in corpus order, then unseen vocabulary).
/// - `Descending`: most probable tokens first, ties kept in insertion order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NucleusOrdering {
	Insertion,
	#[default]
	Descending,
}

/// Tokens a next-token distribution is sampled from.
///
/// - `Observed`: only continuations seen after the resolved context, each
///   with its smoothed probability (the rest of the mass is left out).
/// - `Vocabulary`: the whole vocabulary, unseen tokens included; sums to 1.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistributionSupport {
	#[default]
	Observed,
	Vocabulary,
}

/// Training configuration of a `Talker`.
///
/// # Invariants (checked by `validate`)
/// - `order >= 1`
/// - `delta` is finite and `> 0`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TalkerConfig {
	/// Maximum n-gram order N (contexts hold up to N-1 tokens).
	pub order: usize,

	/// Additive (Lidstone) smoothing strength.
	pub delta: f64,

	/// Ordering policy used by the default nucleus sampler.
	pub ordering: NucleusOrdering,

	/// Tokens that generation may draw after a context.
	pub support: DistributionSupport,
}

impl Default for TalkerConfig {
	fn default() -> Self {
		Self {
			order: 4,
			delta: 1e-2,
			ordering: NucleusOrdering::default(),
			support: DistributionSupport::default(),
		}
	}
}

impl TalkerConfig {
	/// Parses a configuration from RON text.
	///
	/// Missing fields take their default value.
	pub fn from_ron_str(text: &str) -> Result<Self, TalkerError> {
		let config: TalkerConfig = ron::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads a RON configuration file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TalkerError> {
		let text = std::fs::read_to_string(path)?;
		Self::from_ron_str(&text)
	}

	/// Checks the order and smoothing strength.
	///
	/// # Errors
	/// - `InvalidOrder` if `order == 0`
	/// - `InvalidSmoothing` if `delta` is not a finite positive number
	pub fn validate(&self) -> Result<(), TalkerError> {
		if self.order < 1 {
			return Err(TalkerError::InvalidOrder(self.order));
		}
		if !self.delta.is_finite() || self.delta <= 0.0 {
			return Err(TalkerError::InvalidSmoothing(self.delta));
		}
		Ok(())
	}
}
