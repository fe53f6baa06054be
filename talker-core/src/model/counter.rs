use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::state::State;
use crate::text::tokenizer::pad_context;

/// Up to N-1 preceding tokens; its length is the n-gram order minus one.
pub type Context = Vec<String>;

/// Context → continuation counts, for one or several orders at once.
pub type FrequencyTable = HashMap<Context, State>;

/// Counts order-`k` n-grams over tokenized lines.
///
/// For every position of every line, the context is the `k - 1` preceding
/// tokens of the same line, left-padded with `UNKNOWN`. For `k == 1` this is
/// the empty context, which then holds the raw token frequencies.
pub fn count_ngrams(lines: &[Vec<String>], k: usize) -> FrequencyTable {
	let mut counts = FrequencyTable::new();
	if k == 0 {
		return counts;
	}

	for tokens in lines {
		for (idx, next_token) in tokens.iter().enumerate() {
			let context = pad_context(tokens, k - 1, idx);
			counts.entry(context).or_insert_with(State::new).add_transition(next_token, 1);
		}
	}

	debug!("Counted {}-grams: {} contexts", k, counts.len());
	counts
}

/// Counts every order from 1 to `order` and merges them into one table.
///
/// # Behavior
/// - Orders are spread over worker threads (at most one per CPU).
/// - Workers send their tables back through an MPSC channel.
/// - Tables are merged by ascending order, so the result does not depend
///   on thread scheduling.
///
/// Contexts of different orders differ in length and never collide.
pub fn count_all_orders(lines: &[Vec<String>], order: usize) -> FrequencyTable {
	let workers = num_cpus::get().clamp(1, order.max(1));
	let mut by_order: Vec<Option<FrequencyTable>> = (0..=order).map(|_| None).collect();

	thread::scope(|scope| {
		let (tx, rx) = mpsc::channel();
		for worker in 0..workers {
			let tx = tx.clone();
			scope.spawn(move || {
				for k in (worker + 1..=order).step_by(workers) {
					if tx.send((k, count_ngrams(lines, k))).is_err() {
						break;
					}
				}
			});
		}
		drop(tx);

		for (k, counts) in rx.iter() {
			by_order[k] = Some(counts);
		}
	});

	let mut merged = FrequencyTable::new();
	for counts in by_order.into_iter().flatten() {
		for (context, state) in counts {
			match merged.get_mut(&context) {
				Some(existing) => existing.merge(&state),
				None => {
					merged.insert(context, state);
				}
			}
		}
	}
	merged
}
