use std::path::Path;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::TalkerConfig;
use crate::error::TalkerError;
use crate::io;
use crate::model::ngram_model::NGramModel;
use crate::model::prediction_input::PredictionInput;
use crate::model::sampling::{NucleusSampling, SamplingStrategy};
use crate::text::morph::{MorphAnalyzer, NoMorphology};
use crate::text::postprocess::postprocess_tokens;
use crate::text::segmenter::{RuleSegmenter, Segmenter};
use crate::text::tokenizer::tokenize;

/// High-level text generator over a trained n-gram model.
///
/// # Responsibilities
/// - Tokenize prompts the same way the corpus was tokenized
/// - Extend the prompt token by token until the length budget is reached
/// - Turn the raw tokens into prose
///
/// A `Talker` is immutable once built. Every call owns its token buffer and
/// its random generator, so one `Talker` can serve concurrent callers
/// (it is `Send + Sync`) without any lock.
pub struct Talker {
	model: NGramModel,
	segmenter: Box<dyn Segmenter>,
	morph: Box<dyn MorphAnalyzer>,
	strategy: Box<dyn SamplingStrategy>,
}

/// Builder for training a `Talker`.
///
/// Defaults: `TalkerConfig::default()`, `RuleSegmenter`, `NoMorphology`
/// and `NucleusSampling` with the configured ordering.
pub struct TalkerBuilder {
	config: TalkerConfig,
	segmenter: Box<dyn Segmenter>,
	morph: Box<dyn MorphAnalyzer>,
	strategy: Option<Box<dyn SamplingStrategy>>,
}

impl TalkerBuilder {
	pub fn config(mut self, config: TalkerConfig) -> Self {
		self.config = config;
		self
	}

	pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
		self.segmenter = Box::new(segmenter);
		self
	}

	pub fn with_morphology(mut self, morph: impl MorphAnalyzer + 'static) -> Self {
		self.morph = Box::new(morph);
		self
	}

	/// Replaces the default nucleus sampler.
	pub fn with_strategy(mut self, strategy: impl SamplingStrategy + 'static) -> Self {
		self.strategy = Some(Box::new(strategy));
		self
	}

	/// Trains on in-memory corpus lines.
	///
	/// # Errors
	/// - Invalid configuration (`InvalidOrder`, `InvalidSmoothing`), checked
	///   by `NGramModel::fit` before any counting
	/// - `EmptyVocabulary` if the lines hold no tokens
	pub fn fit_lines<S: AsRef<str>>(self, lines: &[S]) -> Result<Talker, TalkerError> {
		let tokenized: Vec<Vec<String>> = lines
			.iter()
			.map(|line| tokenize(self.segmenter.as_ref(), line.as_ref()))
			.collect();
		let model = NGramModel::fit(&tokenized, &self.config)?;

		let strategy = self
			.strategy
			.unwrap_or_else(|| Box::new(NucleusSampling::new(self.config.ordering)) as Box<dyn SamplingStrategy>);
		Ok(Talker { model, segmenter: self.segmenter, morph: self.morph, strategy })
	}

	/// Trains on the lines of every given file.
	///
	/// Paths that do not exist are skipped; if none is readable the corpus
	/// is empty and training fails with `EmptyVocabulary`.
	pub fn fit_files<P: AsRef<Path>>(self, paths: &[P]) -> Result<Talker, TalkerError> {
		let lines = io::read_corpus(paths)?;
		info!("Read {} corpus lines from {} paths", lines.len(), paths.len());
		self.fit_lines(&lines)
	}
}

impl Talker {
	pub fn builder() -> TalkerBuilder {
		TalkerBuilder {
			config: TalkerConfig::default(),
			segmenter: Box::new(RuleSegmenter),
			morph: Box::new(NoMorphology),
			strategy: None,
		}
	}

	/// The trained model.
	pub fn model(&self) -> &NGramModel {
		&self.model
	}

	/// Tokenizes `text` the way the corpus was tokenized.
	pub fn tokenize(&self, text: &str) -> Vec<String> {
		tokenize(self.segmenter.as_ref(), text)
	}

	/// Raw token sequence for `prompt`, before post-processing.
	///
	/// # Behavior
	/// - Starts from the tokenized prompt.
	/// - Appends sampled tokens until the sequence holds `max_len` tokens.
	/// - A prompt already `max_len` tokens long (or longer) is returned as is.
	/// - Identical inputs with the same `random_state` give identical output.
	pub fn generate_tokens(&self, prompt: &str, input: &PredictionInput) -> Vec<String> {
		let mut rng = match input.random_state {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};

		let mut tokens = self.tokenize(prompt);
		while tokens.len() < input.max_len {
			let distribution = self.model.lookup(&tokens);
			let next_token = self.strategy.sample(&distribution, input, &mut rng);
			tokens.push(next_token);
		}
		tokens
	}

	/// Cleans a raw token sequence into prose.
	pub fn postprocess(&self, tokens: &[String]) -> String {
		postprocess_tokens(tokens, self.morph.as_ref())
	}

	/// Generates a reply continuing `prompt`.
	///
	/// The text may end earlier than the budget: the sentence left unfinished
	/// by the budget is dropped by post-processing.
	pub fn talk(&self, prompt: &str, input: &PredictionInput) -> String {
		let tokens = self.generate_tokens(prompt, input);
		debug!(
			"Generated {} raw tokens (max_len={}, seed={:?})",
			tokens.len(),
			input.max_len,
			input.random_state
		);
		self.postprocess(&tokens)
	}
}
