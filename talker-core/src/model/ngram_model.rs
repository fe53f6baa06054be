use std::collections::HashMap;

use log::info;

use super::counter::{count_all_orders, Context};
use super::state::State;
use crate::config::{DistributionSupport, TalkerConfig};
use crate::error::TalkerError;
use crate::text::tokenizer::pad_context;

/// Probability distribution over next tokens.
///
/// Entries keep the order they were produced in; samplers may rely on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
	entries: Vec<(String, f64)>,
}

impl Distribution {
	pub fn new(entries: Vec<(String, f64)>) -> Self {
		Self { entries }
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.entries.iter().map(|(token, p)| (token.as_str(), *p))
	}

	/// Probability of `token`, `None` if it is not part of the distribution.
	pub fn get(&self, token: &str) -> Option<f64> {
		self.iter().find(|(t, _)| *t == token).map(|(_, p)| p)
	}

	/// Sum of all probabilities.
	pub fn total(&self) -> f64 {
		self.entries.iter().map(|(_, p)| p).sum()
	}
}

/// Observed counts of one context with its smoothing denominator.
#[derive(Clone, Debug)]
struct SmoothedState {
	counts: State,
	/// `total count + delta * |vocabulary|`
	denominator: f64,
}

/// Variable-order n-gram language model with additive smoothing.
///
/// The model holds every context of length 0 to `n - 1` seen in training,
/// keyed uniformly by its token sequence. For a context `c` and a
/// vocabulary token `t`:
///
/// `P(t | c) = (count(t) + delta) / (total(c) + delta * |vocabulary|)`
///
/// # Invariants
/// - `n >= 1`, `delta > 0`
/// - The vocabulary is non-empty, so the empty context is always present
///   and backoff always ends on a distribution
/// - `distribution` covers the whole vocabulary and sums to 1
/// - The model is never mutated after `fit`
///
/// # Notes
/// Generation draws from the support chosen in `TalkerConfig::support`.
/// With the default `Observed` support only continuations seen after the
/// context are candidates; their smoothed probabilities sum to less than 1.
#[derive(Clone, Debug)]
pub struct NGramModel {
	/// The order of the model (contexts hold up to `n - 1` tokens)
	n: usize,

	/// Smoothing strength
	delta: f64,

	/// Tokens `lookup` returns for a context
	support: DistributionSupport,

	/// Every token seen as a continuation, in first-seen order
	vocabulary: Vec<String>,

	/// Mapping from a context to its observed continuations
	states: HashMap<Context, SmoothedState>,
}

impl NGramModel {
	/// Trains a model on tokenized lines with the order, smoothing and
	/// support of `config`.
	///
	/// # Errors
	/// - `InvalidOrder` if `config.order < 1`
	/// - `InvalidSmoothing` if `config.delta` is not finite or `<= 0`
	/// - `EmptyVocabulary` if the lines hold no tokens
	pub fn fit(lines: &[Vec<String>], config: &TalkerConfig) -> Result<Self, TalkerError> {
		config.validate()?;
		let (n, delta) = (config.order, config.delta);

		info!("Fitting {}-gram model on {} lines", n, lines.len());
		let counts = count_all_orders(lines, n);

		// Every continuation is also a token of some line, so the unigram
		// table lists the whole vocabulary in corpus order.
		let vocabulary: Vec<String> = match counts.get(&Context::new()) {
			Some(unigram) => unigram.transitions().map(|(token, _)| token.to_owned()).collect(),
			None => Vec::new(),
		};
		if vocabulary.is_empty() {
			return Err(TalkerError::EmptyVocabulary);
		}

		let smoothing_mass = delta * vocabulary.len() as f64;
		let states: HashMap<Context, SmoothedState> = counts
			.into_iter()
			.map(|(context, counts)| {
				let denominator = counts.total() as f64 + smoothing_mass;
				(context, SmoothedState { counts, denominator })
			})
			.collect();

		info!(
			"Fitted {}-gram model: {} contexts, {} vocabulary tokens",
			n,
			states.len(),
			vocabulary.len()
		);
		Ok(Self { n, delta, support: config.support, vocabulary, states })
	}

	pub fn order(&self) -> usize {
		self.n
	}

	pub fn delta(&self) -> f64 {
		self.delta
	}

	pub fn support(&self) -> DistributionSupport {
		self.support
	}

	pub fn vocabulary(&self) -> &[String] {
		&self.vocabulary
	}

	/// Number of contexts, all orders included.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// All trained contexts, in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = &[String]> {
		self.states.keys().map(Vec::as_slice)
	}

	/// Smoothed `P(token | context)`.
	///
	/// Returns `None` if the context was never seen or the token is
	/// outside the vocabulary.
	pub fn probability(&self, context: &[String], token: &str) -> Option<f64> {
		let smoothed = self.states.get(context)?;
		if !smoothed.counts.contains(token) && !self.vocabulary.iter().any(|t| t == token) {
			return None;
		}
		Some((smoothed.counts.count(token) as f64 + self.delta) / smoothed.denominator)
	}

	/// Smoothed distribution of a trained context, without backoff.
	///
	/// Observed continuations come first, in corpus order, followed by the
	/// unseen vocabulary tokens in vocabulary order.
	pub fn distribution(&self, context: &[String]) -> Option<Distribution> {
		let smoothed = self.states.get(context)?;
		let unseen = self.delta / smoothed.denominator;

		let mut entries = Vec::with_capacity(self.vocabulary.len());
		for (token, count) in smoothed.counts.transitions() {
			entries.push((token.to_owned(), (count as f64 + self.delta) / smoothed.denominator));
		}
		for token in &self.vocabulary {
			if !smoothed.counts.contains(token) {
				entries.push((token.clone(), unseen));
			}
		}
		Some(Distribution::new(entries))
	}

	/// Continuations seen after a trained context, in corpus order, with
	/// their smoothed probabilities. No backoff.
	pub fn observed_distribution(&self, context: &[String]) -> Option<Distribution> {
		let smoothed = self.states.get(context)?;
		let entries = smoothed
			.counts
			.transitions()
			.map(|(token, count)| (token.to_owned(), (count as f64 + self.delta) / smoothed.denominator))
			.collect();
		Some(Distribution::new(entries))
	}

	/// Finds the context used to predict the token following `prefix`.
	///
	/// Starts from the trailing `n - 1` tokens of `prefix` (left-padded with
	/// `UNKNOWN`), then drops the oldest token until a trained context is
	/// found. Returns `None` only if not even the empty context is trained.
	pub fn resolve_context(&self, prefix: &[String]) -> Option<Context> {
		let context = pad_context(prefix, self.n - 1, prefix.len());
		let mut candidate = context.as_slice();
		loop {
			if self.states.contains_key(candidate) {
				return Some(candidate.to_vec());
			}
			if candidate.is_empty() {
				return None;
			}
			candidate = &candidate[1..];
		}
	}

	/// Next-token distribution for `prefix`, with backoff, over the
	/// configured support.
	///
	/// Empty only if the model has no empty context, which `fit` prevents.
	/// Every trained context has at least one observed continuation.
	pub fn lookup(&self, prefix: &[String]) -> Distribution {
		let Some(context) = self.resolve_context(prefix) else {
			return Distribution::default();
		};
		let distribution = match self.support {
			DistributionSupport::Observed => self.observed_distribution(&context),
			DistributionSupport::Vocabulary => self.distribution(&context),
		};
		distribution.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::text::segmenter::RuleSegmenter;
	use crate::text::tokenizer::{tokenize, START, UNKNOWN};

	fn strings(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	fn config(order: usize, delta: f64) -> TalkerConfig {
		TalkerConfig { order, delta, ..TalkerConfig::default() }
	}

	fn tokenize_lines(lines: &[&str]) -> Vec<Vec<String>> {
		lines.iter().map(|line| tokenize(&RuleSegmenter, line)).collect()
	}

	fn fit(lines: &[&str], n: usize, delta: f64) -> NGramModel {
		NGramModel::fit(&tokenize_lines(lines), &config(n, delta)).unwrap()
	}

	fn fit_full_support(lines: &[&str], n: usize, delta: f64) -> NGramModel {
		let config = TalkerConfig { support: DistributionSupport::Vocabulary, ..config(n, delta) };
		NGramModel::fit(&tokenize_lines(lines), &config).unwrap()
	}

	#[test]
	fn unigram_covers_every_token() {
		let model = fit(&["кот лежит на окне."], 2, 0.01);
		let unigram = model.distribution(&[]).unwrap();
		for token in ["кот", "лежит", "на", "окне", "."] {
			assert!(unigram.get(token).unwrap() > 0.0, "{token}");
		}
		assert_eq!(model.vocabulary(), strings(&[START, "кот", "лежит", "на", "окне", "."]).as_slice());
	}

	#[test]
	fn every_distribution_sums_to_one() {
		let model = fit(
			&["Кот лежит на окне. Кот спит!", "Собака лежит на полу.", "На окне кот."],
			3,
			0.5,
		);
		let contexts: Vec<Vec<String>> = model.contexts().map(<[String]>::to_vec).collect();
		assert!(!contexts.is_empty());
		for context in contexts {
			let distribution = model.distribution(&context).unwrap();
			assert_eq!(distribution.len(), model.vocabulary().len());
			assert!((distribution.total() - 1.0).abs() < 1e-9, "{context:?}");
		}
	}

	#[test]
	fn applies_lidstone_formula() {
		let model = fit(&["а б а в"], 2, 0.5);
		// vocabulary: <S>, а, б, в ; context [а] saw б once and в once
		let context = strings(&["а"]);
		let expected = (1.0 + 0.5) / (2.0 + 0.5 * 4.0);
		assert!((model.probability(&context, "б").unwrap() - expected).abs() < 1e-12);
		let unseen = 0.5 / (2.0 + 0.5 * 4.0);
		assert!((model.probability(&context, START).unwrap() - unseen).abs() < 1e-12);
		assert_eq!(model.probability(&context, "г"), None);
		assert_eq!(model.probability(&strings(&["г"]), "а"), None);
	}

	#[test]
	fn observed_tokens_come_first() {
		let model = fit(&["а б а в"], 2, 0.01);
		let distribution = model.distribution(&strings(&["а"])).unwrap();
		let tokens: Vec<&str> = distribution.iter().map(|(t, _)| t).collect();
		assert_eq!(tokens, vec!["б", "в", START, "а"]);
	}

	#[test]
	fn backoff_drops_oldest_tokens() {
		let model = fit(&["а б в", "г б д"], 3, 0.01);

		// exact trigram context
		assert_eq!(model.resolve_context(&strings(&[START, "а", "б"])), Some(strings(&["а", "б"])));
		// [в, б] never seen, [б] was
		assert_eq!(model.resolve_context(&strings(&["в", "б"])), Some(strings(&["б"])));
		// nothing known backs off to the empty context
		assert_eq!(model.resolve_context(&strings(&["х", "у"])), Some(Vec::new()));
	}

	#[test]
	fn short_prefixes_are_padded() {
		let model = fit(&["а б"], 3, 0.01);
		assert_eq!(model.resolve_context(&[]), Some(strings(&[UNKNOWN, UNKNOWN])));
		assert_eq!(model.resolve_context(&strings(&[START])), Some(strings(&[UNKNOWN, START])));

		let distribution = model.lookup(&[]);
		assert_eq!(distribution.iter().collect::<Vec<_>>(), vec![(START, (1.0 + 0.01) / (1.0 + 0.01 * 3.0))]);
	}

	#[test]
	fn lookup_is_never_empty() {
		let prefixes = [vec![], strings(&["неизвестно"]), strings(&[START, "кот", "спит", ".", "пёс"])];

		let model = fit(&["кот спит.", "пёс лает!"], 4, 0.1);
		for prefix in &prefixes {
			assert!(!model.lookup(prefix).is_empty(), "{prefix:?}");
		}

		let model = fit_full_support(&["кот спит.", "пёс лает!"], 4, 0.1);
		for prefix in &prefixes {
			let distribution = model.lookup(prefix);
			assert_eq!(distribution.len(), model.vocabulary().len());
			assert!((distribution.total() - 1.0).abs() < 1e-9);
		}
	}

	#[test]
	fn observed_support_keeps_seen_continuations_only() {
		let model = fit(&["а б а в", "а б"], 2, 0.5);
		assert_eq!(model.support(), DistributionSupport::Observed);

		// vocabulary: <S>, а, б, в ; context [а] saw б twice and в once
		let distribution = model.lookup(&strings(&[START, "а"]));
		let denominator = 3.0 + 0.5 * 4.0;
		assert_eq!(
			distribution.iter().collect::<Vec<_>>(),
			vec![("б", 2.5 / denominator), ("в", 1.5 / denominator)]
		);
		assert_eq!(model.observed_distribution(&strings(&["а"])), Some(distribution));
		assert_eq!(model.observed_distribution(&strings(&["г"])), None);
	}

	#[test]
	fn rejects_bad_configuration() {
		let lines = vec![strings(&[START, "а"])];
		assert!(matches!(NGramModel::fit(&lines, &config(0, 0.1)), Err(TalkerError::InvalidOrder(0))));
		assert!(matches!(NGramModel::fit(&lines, &config(2, 0.0)), Err(TalkerError::InvalidSmoothing(_))));
		assert!(matches!(NGramModel::fit(&lines, &config(2, -1.0)), Err(TalkerError::InvalidSmoothing(_))));
		assert!(matches!(NGramModel::fit(&[], &config(2, 0.1)), Err(TalkerError::EmptyVocabulary)));
		assert!(matches!(NGramModel::fit(&[vec![], vec![]], &config(2, 0.1)), Err(TalkerError::EmptyVocabulary)));
	}

	#[test]
	fn unigram_model_only_has_empty_context() {
		let model = fit(&["а б а"], 1, 1.0);
		assert_eq!(model.len(), 1);
		assert_eq!(model.order(), 1);
		assert_eq!(model.resolve_context(&strings(&["а"])), Some(Vec::new()));
		assert!((model.lookup(&[]).get("а").unwrap() - 3.0 / 7.0).abs() < 1e-12);
	}
}
