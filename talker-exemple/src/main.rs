use std::env;

use log::info;
use talker_core::{PredictionInput, Talker, TalkerConfig};

/// Escapes characters that a Markdown renderer would interpret.
fn escape_markdown(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		if matches!(c, '*' | '_' | '`') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	// Usage: talker-exemple [--config talker.ron] <corpus.txt>...
	let mut args = env::args().skip(1).peekable();
	let config = match args.peek().map(String::as_str) {
		Some("--config") => {
			args.next();
			let path = args.next().ok_or("--config needs a path")?;
			TalkerConfig::load(path)?
		}
		_ => TalkerConfig::default(),
	};
	let corpus: Vec<String> = args.collect();
	if corpus.is_empty() {
		return Err("Usage: talker-exemple [--config talker.ron] <corpus.txt>...".into());
	}

	// Missing corpus files are skipped, an empty corpus is an error
	let talker = Talker::builder().config(config).fit_files(&corpus)?;
	info!("Vocabulary size: {}", talker.model().vocabulary().len());

	// Same settings as a chat reply: 50 tokens, temperature 0.9, top_p 0.85
	let mut input = PredictionInput::default();

	// Invalid values are rejected and leave the input untouched
	match input.set_temperature(0.0) {
		Ok(_) => println!("Should not happen"),
		Err(e) => println!("{e}"),
	}
	match input.set_top_p(1.5) {
		Ok(_) => println!("Should not happen"),
		Err(e) => println!("{e}"),
	}

	// A fixed seed gives the same reply every run
	input.random_state = Some(42);
	for prompt in ["", "Привет!", "Расскажи что-нибудь про котов."] {
		let reply = talker.talk(prompt, &input);
		println!("> {prompt}\n{}", escape_markdown(&reply));
	}

	// Without a seed, every reply is different
	input.random_state = None;
	for i in 0..3 {
		println!("Random reply {}: {}", i + 1, escape_markdown(&talker.talk("", &input)));
	}

	Ok(())
}
