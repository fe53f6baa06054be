use rand::{Rng, RngCore};

use super::ngram_model::Distribution;
use super::prediction_input::PredictionInput;
use crate::config::NucleusOrdering;
use crate::text::tokenizer::UNKNOWN;

/// Picks the next token from a distribution.
///
/// Implementations must draw all randomness from `rng` so that a seeded
/// generator reproduces its output.
pub trait SamplingStrategy: Send + Sync {
	fn sample(&self, distribution: &Distribution, input: &PredictionInput, rng: &mut dyn RngCore) -> String;
}

/// Temperature + nucleus (top-p) sampling.
///
/// 1. Probabilities are raised to `1 / temperature` and renormalized
///    (skipped when the temperature is exactly 1).
/// 2. Tokens are walked in `ordering` order; the smallest prefix whose
///    cumulative weight reaches `top_p` is kept (at least one token). If
///    the weights never reach `top_p`, as with a distribution restricted to
///    observed continuations, every token is kept.
/// 3. One token is drawn from the renormalized prefix.
///
/// An empty distribution yields `UNKNOWN`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NucleusSampling {
	pub ordering: NucleusOrdering,
}

impl NucleusSampling {
	pub fn new(ordering: NucleusOrdering) -> Self {
		Self { ordering }
	}

	/// Candidate tokens and their normalized weights after temperature and
	/// nucleus truncation, in walk order.
	pub fn candidates<'a>(&self, distribution: &'a Distribution, temperature: f64, top_p: f64) -> Vec<(&'a str, f64)> {
		let mut weights: Vec<(&str, f64)> = distribution.iter().collect();
		if weights.is_empty() {
			return weights;
		}

		if temperature != 1.0 {
			// p^(1/t) relative to the mode, so tiny probabilities cannot
			// all underflow to zero
			let max_log = weights.iter().map(|(_, p)| p.ln()).fold(f64::NEG_INFINITY, f64::max);
			for (_, weight) in weights.iter_mut() {
				*weight = ((weight.ln() - max_log) / temperature).exp();
			}
			normalize(&mut weights);
		}

		if self.ordering == NucleusOrdering::Descending {
			weights.sort_by(|a, b| b.1.total_cmp(&a.1));
		}

		let mut cumulative = 0.0;
		let mut keep = weights.len();
		for (idx, (_, weight)) in weights.iter().enumerate() {
			cumulative += weight;
			if cumulative >= top_p {
				keep = idx + 1;
				break;
			}
		}
		weights.truncate(keep);
		normalize(&mut weights);
		weights
	}
}

/// Scales weights to sum to 1; leaves them untouched if they sum to 0.
fn normalize(weights: &mut [(&str, f64)]) {
	let total: f64 = weights.iter().map(|(_, w)| w).sum();
	if total > 0.0 && total.is_finite() {
		for (_, weight) in weights.iter_mut() {
			*weight /= total;
		}
	}
}

/// Weighted random choice over normalized candidates.
///
/// Walks the cumulative weights; rounding leftovers fall back to the last
/// candidate.
fn weighted_choice(candidates: &[(&str, f64)], rng: &mut dyn RngCore) -> Option<String> {
	let total: f64 = candidates.iter().map(|(_, w)| w).sum();
	let mut r = rng.random::<f64>() * total;

	let mut fallback = None;
	for (token, weight) in candidates {
		if r < *weight {
			return Some((*token).to_owned());
		}
		r -= weight;
		fallback = Some((*token).to_owned());
	}
	fallback
}

impl SamplingStrategy for NucleusSampling {
	fn sample(&self, distribution: &Distribution, input: &PredictionInput, rng: &mut dyn RngCore) -> String {
		let candidates = self.candidates(distribution, input.temperature(), input.top_p());
		weighted_choice(&candidates, rng).unwrap_or_else(|| UNKNOWN.to_owned())
	}
}
