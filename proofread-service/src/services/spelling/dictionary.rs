//! Word frequency dictionary backing the spell checker.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// English list compiled into the binary.
const EMBEDDED_DICTIONARY: &str = include_str!("../../../assets/en_words.txt");

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid count on dictionary line {line}: '{content}'")]
    InvalidLine { line: usize, content: String },

    #[error("Dictionary contains no words")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    frequencies: HashMap<String, u64>,
    alphabet: Vec<char>,
    longest_word: usize,
}

impl Dictionary {
    /// Parse `word [count]` lines. Words are lowercased, a missing count is 1,
    /// repeated words add up, and blank or `#` lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R, source: &str) -> Result<Self, DictionaryError> {
        let mut frequencies: HashMap<String, u64> = HashMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| DictionaryError::Io {
                path: source.to_string(),
                source: e,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let word = match parts.next() {
                Some(w) => w.to_lowercase(),
                None => continue,
            };
            let count = match parts.next() {
                Some(raw) => raw.parse::<u64>().map_err(|_| DictionaryError::InvalidLine {
                    line: idx + 1,
                    content: trimmed.to_string(),
                })?,
                None => 1,
            };

            *frequencies.entry(word).or_insert(0) += count;
        }

        Self::from_frequencies(frequencies)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DictionaryError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(BufReader::new(file), &path.display().to_string())
    }

    pub fn embedded() -> Result<Self, DictionaryError> {
        Self::from_reader(EMBEDDED_DICTIONARY.as_bytes(), "embedded")
    }

    fn from_frequencies(frequencies: HashMap<String, u64>) -> Result<Self, DictionaryError> {
        if frequencies.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let alphabet: BTreeSet<char> = frequencies.keys().flat_map(|w| w.chars()).collect();
        let longest_word = frequencies
            .keys()
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(0);

        Ok(Self {
            frequencies,
            alphabet: alphabet.into_iter().collect(),
            longest_word,
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
    }

    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.frequencies.get(word).copied()
    }

    /// Every character that occurs in some dictionary word, sorted.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Length in characters of the longest word.
    pub fn longest_word_length(&self) -> usize {
        self.longest_word
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}
