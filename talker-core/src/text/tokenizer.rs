use super::segmenter::Segmenter;

/// Sentinel placed before the first token of every sentence.
pub const START: &str = "<S>";

/// Sentinel for missing history or an unresolved draw.
pub const UNKNOWN: &str = "<UNK>";

/// Turns text into a flat, lowercased token sequence.
///
/// Each sentence found by `segmenter` contributes `START` followed by its
/// word tokens. The same function is used for corpus lines and prompts, so
/// trained contexts and lookup contexts line up.
pub fn tokenize(segmenter: &dyn Segmenter, text: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	for sentence in segmenter.sentences(text) {
		tokens.push(START.to_owned());
		tokens.extend(segmenter.words(sentence).into_iter().map(str::to_lowercase));
	}
	tokens
}

/// Builds a context of exactly `n` tokens from `tokens[..until]`.
///
/// Takes the trailing `n` tokens and left-pads with `UNKNOWN` when fewer are
/// available. `n == 0` yields the empty (unigram) context.
pub fn pad_context(tokens: &[String], n: usize, until: usize) -> Vec<String> {
	if n == 0 {
		return Vec::new();
	}
	let history = &tokens[..until.min(tokens.len())];
	let tail = &history[history.len().saturating_sub(n)..];

	let mut context = vec![UNKNOWN.to_owned(); n - tail.len()];
	context.extend_from_slice(tail);
	context
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::text::segmenter::RuleSegmenter;

	fn strings(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	#[test]
	fn sentences_get_start_sentinels() {
		let tokens = tokenize(&RuleSegmenter, "Кот лежит. Он спит!");
		assert_eq!(tokens, strings(&[START, "кот", "лежит", ".", START, "он", "спит", "!"]));
	}

	#[test]
	fn empty_text_has_no_tokens() {
		assert!(tokenize(&RuleSegmenter, "").is_empty());
	}

	#[test]
	fn pads_short_history() {
		let tokens = strings(&[START, "кот"]);
		assert_eq!(pad_context(&tokens, 3, tokens.len()), strings(&[UNKNOWN, START, "кот"]));
		assert_eq!(pad_context(&tokens, 2, 0), strings(&[UNKNOWN, UNKNOWN]));
		assert_eq!(pad_context(&tokens, 1, 1), strings(&[START]));
		assert!(pad_context(&tokens, 0, 2).is_empty());
	}

	#[test]
	fn keeps_only_trailing_tokens() {
		let tokens = strings(&["a", "b", "c", "d"]);
		assert_eq!(pad_context(&tokens, 2, 4), strings(&["c", "d"]));
		assert_eq!(pad_context(&tokens, 2, 3), strings(&["b", "c"]));
		assert_eq!(pad_context(&tokens, 2, 10), strings(&["c", "d"]));
	}
}
