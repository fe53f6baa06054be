use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::io;

use log::warn;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads the lines of every corpus file, in the given order.
///
/// Paths that do not exist or are not regular files are skipped.
/// Read errors on existing files are propagated.
pub(crate) fn read_corpus<P: AsRef<Path>>(paths: &[P]) -> io::Result<Vec<String>> {
	let mut lines = Vec::new();
	for path in paths {
		let path = path.as_ref();
		if !path.is_file() {
			warn!("Skipping corpus path {}: not a file", path.display());
			continue;
		}
		lines.extend(read_file(path)?);
	}
	Ok(lines)
}
