use super::morph::MorphAnalyzer;
use super::tokenizer::{START, UNKNOWN};

/// Tokens after which the next word starts a sentence.
const SENTENCE_TERMINATORS: &[&str] = &[START, ".", "!", "?", "...", "…"];

/// Marks glued to the preceding word.
const CLOSING_MARKS: &[char] = &['.', ',', '!', '?', ':', ';', ')', ']', '}', '»', '…'];

/// Marks glued to the following word.
const OPENING_MARKS: &[char] = &['(', '[', '{', '«'];

/// Minimum proper-noun score for a word to be capitalized.
const PROPER_NOUN_THRESHOLD: f64 = 0.5;

/// Uppercases the first character and lowercases the rest.
fn capitalize(token: &str) -> String {
	let mut chars = token.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}

/// Turns a raw generated token sequence into prose.
///
/// 1. Drops `UNKNOWN` tokens.
/// 2. Capitalizes words opening a sentence (after `START` or a terminator)
///    and words the analyzer scores as proper nouns.
/// 3. Cuts the sequence at the last `START` (past the first token), which
///    drops the trailing sentence the length budget may have cut short.
/// 4. Joins with spaces and fixes spacing around punctuation and brackets.
///
/// Never produces more words than it receives.
pub fn postprocess_tokens(tokens: &[String], morph: &dyn MorphAnalyzer) -> String {
	let mut tokens: Vec<String> = tokens.iter().filter(|token| *token != UNKNOWN).cloned().collect();

	let mut last_start = None;
	for idx in 1..tokens.len() {
		if tokens[idx] == START {
			last_start = Some(idx);
			continue;
		}
		if SENTENCE_TERMINATORS.contains(&tokens[idx - 1].as_str())
			|| morph.proper_noun_score(&tokens[idx]) >= PROPER_NOUN_THRESHOLD
		{
			tokens[idx] = capitalize(&tokens[idx]);
		}
	}

	let end = last_start.unwrap_or(tokens.len());
	let mut output = tokens[..end]
		.iter()
		.filter(|token| *token != START)
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join(" ");

	for mark in CLOSING_MARKS {
		output = output.replace(&format!(" {mark}"), &mark.to_string());
	}
	for mark in OPENING_MARKS {
		output = output.replace(&format!("{mark} "), &mark.to_string());
	}
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::text::morph::{Lexicon, NoMorphology, Parse};

	fn strings(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	#[test]
	fn drops_trailing_incomplete_sentence() {
		let tokens = strings(&[START, "привет", START, "мир"]);
		assert_eq!(postprocess_tokens(&tokens, &NoMorphology), "Привет");
	}

	#[test]
	fn single_sentence_is_kept_whole() {
		let tokens = strings(&[START, "кот", "лежит", "на", "окне"]);
		assert_eq!(postprocess_tokens(&tokens, &NoMorphology), "Кот лежит на окне");
	}

	#[test]
	fn fixes_punctuation_spacing() {
		let tokens = strings(&[
			START, "кот", "(", "рыжий", ")", "сказал", ":", "«", "мяу", "»", ",", "и", "ушёл", "...", "да", "!", START,
		]);
		assert_eq!(
			postprocess_tokens(&tokens, &NoMorphology),
			"Кот (рыжий) сказал: «мяу», и ушёл... Да!"
		);
	}

	#[test]
	fn ellipsis_character_ends_a_sentence() {
		let tokens = strings(&[START, "ну", "…", "да", "…", START]);
		assert_eq!(postprocess_tokens(&tokens, &NoMorphology), "Ну… Да…");
	}

	#[test]
	fn removes_unknown_tokens() {
		let tokens = strings(&[UNKNOWN, START, UNKNOWN, "кот", "спит", ".", UNKNOWN, START, "он"]);
		assert_eq!(postprocess_tokens(&tokens, &NoMorphology), "Кот спит.");
	}

	#[test]
	fn capitalizes_proper_nouns() {
		let mut lexicon = Lexicon::new();
		lexicon.insert("москва", Parse::new(&["NOUN", "Geox"], 0.7));
		lexicon.insert("вера", Parse::new(&["NOUN", "Name"], 0.3));

		let tokens = strings(&[START, "я", "люблю", "москва", "и", "вера", ".", START]);
		assert_eq!(postprocess_tokens(&tokens, &lexicon), "Я люблю Москва и вера.");
	}

	#[test]
	fn empty_input_is_empty_output() {
		assert_eq!(postprocess_tokens(&[], &NoMorphology), "");
		assert_eq!(postprocess_tokens(&strings(&[START]), &NoMorphology), "");
	}

	#[test]
	fn capitalize_lowercases_the_tail() {
		assert_eq!(capitalize("пРИВЕТ"), "Привет");
		assert_eq!(capitalize("..."), "...");
		assert_eq!(capitalize(""), "");
	}
}
