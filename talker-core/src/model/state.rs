use std::collections::HashMap;

/// Continuation counts observed after one context.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations. Unlike a plain map,
/// the continuations keep the order in which they were first seen, so
/// distributions derived from them are reproducible run to run.
///
/// ## Invariants
/// - Every stored count is `>= 1`
/// - `total` is the sum of all counts
/// - `index[token]` is the position of `token` in `transitions`
#[derive(Clone, Debug, Default)]
pub struct State {
	/// Continuations in first-seen order, with their counts.
	transitions: Vec<(String, usize)>,
	/// Position of each continuation in `transitions`.
	index: HashMap<String, usize>,
	/// Sum of all counts.
	total: usize,
}

impl State {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `occurrence` more observations of `next_token`.
	pub fn add_transition(&mut self, next_token: &str, occurrence: usize) {
		if occurrence == 0 {
			return;
		}
		match self.index.get(next_token) {
			Some(&position) => self.transitions[position].1 += occurrence,
			None => {
				self.index.insert(next_token.to_owned(), self.transitions.len());
				self.transitions.push((next_token.to_owned(), occurrence));
			}
		}
		self.total += occurrence;
	}

	/// Count of `token`, zero if never observed.
	pub fn count(&self, token: &str) -> usize {
		self.index.get(token).map_or(0, |&position| self.transitions[position].1)
	}

	pub fn contains(&self, token: &str) -> bool {
		self.index.contains_key(token)
	}

	pub fn total(&self) -> usize {
		self.total
	}

	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Continuations and counts, in first-seen order.
	pub fn transitions(&self) -> impl Iterator<Item = (&str, usize)> {
		self.transitions.iter().map(|(token, count)| (token.as_str(), *count))
	}

	/// Merges another state into this one.
	///
	/// Counts are summed; continuations new to `self` are appended in
	/// `other`'s order.
	pub fn merge(&mut self, other: &Self) {
		for (token, occurrence) in other.transitions() {
			self.add_transition(token, occurrence);
		}
	}
}
