//! Word list loading.

use std::io::BufRead;

use crate::error::CorpusError;

use super::chains::MarkovChains;

/// Read a word list, one word per line.
///
/// Surrounding whitespace is trimmed and blank lines are skipped, so spaces
/// and `\r` at either end of a line never become part of a word. Any line
/// that is not valid UTF-8 aborts the whole read.
pub fn read_words(reader: impl BufRead) -> Result<Vec<String>, CorpusError> {
    let mut words = Vec::new();
    for (n, line) in reader.split(b'\n').enumerate() {
        let bytes = line?;
        let text = std::str::from_utf8(&bytes).map_err(|_| CorpusError::InvalidUtf8 { line: n + 1 })?;
        let word = text.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Read a word list and train chains on it.
pub fn load_chains(reader: impl BufRead, prefix_length: usize) -> Result<MarkovChains, CorpusError> {
    let words = read_words(reader)?;
    log::info!("loaded {} words", words.len());
    MarkovChains::train(&words, prefix_length)
}
