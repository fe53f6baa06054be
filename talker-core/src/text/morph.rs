use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TalkerError;

/// Grammemes marking proper-noun-like interpretations:
/// geographic, personal, surname, patronymic, organization,
/// traditional name and initialism.
pub const PROPER_NOUN_TAGS: &[&str] = &["Geox", "Name", "Surn", "Patr", "Orgn", "Trad", "Init"];

/// One morphological interpretation of a word.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Parse {
	/// Grammeme tags of this interpretation.
	pub tags: Vec<String>,
	/// Confidence of this interpretation, in `[0, 1]`.
	pub score: f64,
}

impl Parse {
	pub fn new(tags: &[&str], score: f64) -> Self {
		Self { tags: tags.iter().map(|t| t.to_string()).collect(), score }
	}

	/// Whether this interpretation carries any of `tags`.
	pub fn has_any(&self, tags: &[&str]) -> bool {
		self.tags.iter().any(|tag| tags.contains(&tag.as_str()))
	}
}

/// Morphological analyzer used to detect proper nouns.
pub trait MorphAnalyzer: Send + Sync {
	/// All interpretations of `word`, possibly none.
	fn parse(&self, word: &str) -> Vec<Parse>;

	/// Sums the scores of interpretations tagged as proper nouns.
	///
	/// Each interpretation counts once, even with several matching tags.
	fn proper_noun_score(&self, word: &str) -> f64 {
		self.parse(word)
			.iter()
			.filter(|parse| parse.has_any(PROPER_NOUN_TAGS))
			.map(|parse| parse.score)
			.sum()
	}
}

/// Analyzer that knows no words.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMorphology;

impl MorphAnalyzer for NoMorphology {
	fn parse(&self, _word: &str) -> Vec<Parse> {
		Vec::new()
	}
}

/// Dictionary-backed analyzer: lowercase word → interpretations.
///
/// RON format:
/// ```ron
/// { "москва": [(tags: ["NOUN", "Geox"], score: 1.0)] }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct Lexicon {
	entries: HashMap<String, Vec<Parse>>,
}

impl Lexicon {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an interpretation for `word` (stored lowercased).
	pub fn insert(&mut self, word: &str, parse: Parse) {
		self.entries.entry(word.to_lowercase()).or_default().push(parse);
	}

	pub fn from_ron_str(text: &str) -> Result<Self, TalkerError> {
		let entries: HashMap<String, Vec<Parse>> = ron::from_str(text)?;
		let mut lexicon = Self::new();
		for (word, parses) in entries {
			for parse in parses {
				lexicon.insert(&word, parse);
			}
		}
		Ok(lexicon)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl MorphAnalyzer for Lexicon {
	fn parse(&self, word: &str) -> Vec<Parse> {
		self.entries.get(&word.to_lowercase()).cloned().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scores_only_proper_noun_parses() {
		let mut lexicon = Lexicon::new();
		lexicon.insert("Вера", Parse::new(&["NOUN", "Name", "femn"], 0.4));
		lexicon.insert("вера", Parse::new(&["NOUN", "inan"], 0.5));
		lexicon.insert("вера", Parse::new(&["NOUN", "Name", "Surn"], 0.2));

		let score = lexicon.proper_noun_score("вера");
		assert!((score - 0.6).abs() < 1e-12);
		assert_eq!(lexicon.len(), 1);
	}

	#[test]
	fn unknown_words_score_zero() {
		assert_eq!(NoMorphology.proper_noun_score("москва"), 0.0);
		assert_eq!(Lexicon::new().proper_noun_score("москва"), 0.0);
	}

	#[test]
	fn loads_from_ron() {
		let lexicon = Lexicon::from_ron_str(
			r#"{ "Москва": [(tags: ["NOUN", "Geox"], score: 0.9)], "кот": [(tags: ["NOUN"], score: 1.0)] }"#,
		)
		.unwrap();
		assert_eq!(lexicon.parse("москва"), vec![Parse::new(&["NOUN", "Geox"], 0.9)]);
		assert_eq!(lexicon.proper_noun_score("кот"), 0.0);
	}
}
