/// Splits raw text into sentences and sentences into word tokens.
///
/// This is the seam where a language-aware segmenter plugs in.
/// Returned slices borrow from the input and keep their original case.
pub trait Segmenter: Send + Sync {
	/// Ordered sentence spans of `text`, trimmed, never empty.
	fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

	/// Ordered word and punctuation tokens of one sentence.
	fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
}

/// Characters that may close a sentence.
const SENTENCE_ENDERS: &[char] = &['.', '!', '?', '…'];

/// Closing marks absorbed into the sentence that precedes them.
const CLOSING_MARKS: &[char] = &['"', '\'', '»', '”', ')', ']', '}'];

/// Rule-based segmenter working on whitespace and punctuation.
///
/// # Sentences
/// A sentence ends after a run of `.`, `!`, `?` or `…` (plus any closing
/// quotes or brackets) that is followed by whitespace or the end of text,
/// unless the next word starts with a lowercase letter.
///
/// # Words
/// - letter/digit runs, keeping inner `-` and apostrophes (`кто-то`, `don't`)
///   and digit separators (`3.14`, `1,5`)
/// - a run of dots is a single token (`...`)
/// - any other non-space character is a token on its own
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
	fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, span: &'a str) {
		let span = span.trim();
		if !span.is_empty() {
			sentences.push(span);
		}
	}

	/// Whether `c` glues `prev` and `next` into a single word.
	fn is_joiner(prev: char, c: char, next: char) -> bool {
		match c {
			'-' | '\'' | '’' => prev.is_alphanumeric() && next.is_alphanumeric(),
			'.' | ',' => prev.is_ascii_digit() && next.is_ascii_digit(),
			_ => false,
		}
	}
}

impl Segmenter for RuleSegmenter {
	fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
		let mut sentences = Vec::new();
		let mut start = 0;
		let mut chars = text.char_indices().peekable();

		while let Some((_, c)) = chars.next() {
			if !SENTENCE_ENDERS.contains(&c) {
				continue;
			}
			while let Some(&(_, next)) = chars.peek() {
				if SENTENCE_ENDERS.contains(&next) || CLOSING_MARKS.contains(&next) {
					chars.next();
				} else {
					break;
				}
			}

			let end = chars.peek().map_or(text.len(), |&(i, _)| i);
			let rest = &text[end..];
			let at_boundary = rest.is_empty()
				|| (rest.starts_with(char::is_whitespace)
					&& !rest.trim_start().starts_with(char::is_lowercase));
			if at_boundary {
				Self::push_trimmed(&mut sentences, &text[start..end]);
				start = end;
			}
		}

		Self::push_trimmed(&mut sentences, &text[start..]);
		sentences
	}

	fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
		let chars: Vec<(usize, char)> = sentence.char_indices().collect();
		let byte_at = |i: usize| chars.get(i).map_or(sentence.len(), |&(b, _)| b);

		let mut words = Vec::new();
		let mut i = 0;
		while i < chars.len() {
			let c = chars[i].1;
			if c.is_whitespace() {
				i += 1;
				continue;
			}

			let start = i;
			i += 1;
			if c.is_alphanumeric() {
				while i < chars.len() {
					let next = chars[i].1;
					if next.is_alphanumeric() {
						i += 1;
					} else if chars
						.get(i + 1)
						.is_some_and(|&(_, after)| Self::is_joiner(chars[i - 1].1, next, after))
					{
						i += 2;
					} else {
						break;
					}
				}
			} else if c == '.' {
				while i < chars.len() && chars[i].1 == '.' {
					i += 1;
				}
			}
			words.push(&sentence[chars[start].0..byte_at(i)]);
		}
		words
	}
}
