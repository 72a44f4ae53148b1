//! Frequency-dictionary spell checker.
//!
//! A word is suggested for when it is "unknown": checkable and absent from
//! the dictionary. Candidates are the known words at the smallest edit
//! distance (deletes, transposes, replaces, inserts), ranked by frequency.

pub mod dictionary;

pub use dictionary::{Dictionary, DictionaryError};

use crate::config::MAX_SUGGESTIONS;
use std::collections::HashSet;

pub struct SpellChecker {
    dictionary: Dictionary,
    distance: u8,
}

impl SpellChecker {
    /// `distance` is clamped to 1..=2.
    pub fn new(dictionary: Dictionary, distance: u8) -> Self {
        Self {
            dictionary,
            distance: distance.clamp(1, 2),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn normalize(word: &str) -> String {
        word.trim().to_lowercase()
    }

    /// False for input that is not a word worth checking: empty, a lone
    /// punctuation mark, a number, `nan`, or far longer than any known word.
    pub fn should_check(&self, word: &str) -> bool {
        let word = Self::normalize(word);
        let len = word.chars().count();

        if len == 0 {
            return false;
        }
        if len == 1 && word.chars().all(|c| c.is_ascii_punctuation()) {
            return false;
        }
        if len > self.dictionary.longest_word_length() + 3 {
            return false;
        }
        if word == "nan" {
            return false;
        }
        word.parse::<f64>().is_err()
    }

    pub fn is_unknown(&self, word: &str) -> bool {
        self.should_check(word) && !self.dictionary.contains(&Self::normalize(word))
    }

    /// All strings one edit away from `word` over the dictionary alphabet.
    fn edits1(&self, word: &str) -> HashSet<String> {
        let chars: Vec<char> = word.chars().collect();
        let alphabet = self.dictionary.alphabet();
        let mut edits = HashSet::new();

        for i in 0..=chars.len() {
            let (left, right) = chars.split_at(i);
            let left: String = left.iter().collect();

            if !right.is_empty() {
                let tail: String = right[1..].iter().collect();
                edits.insert(format!("{left}{tail}"));

                if right.len() > 1 {
                    let rest: String = right[2..].iter().collect();
                    edits.insert(format!("{left}{}{}{rest}", right[1], right[0]));
                }

                for c in alphabet {
                    edits.insert(format!("{left}{c}{tail}"));
                }
            }

            let right: String = right.iter().collect();
            for c in alphabet {
                edits.insert(format!("{left}{c}{right}"));
            }
        }

        edits
    }

    fn known<'a, I>(&self, words: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        words
            .into_iter()
            .filter(|w| self.dictionary.contains(w))
            .cloned()
            .collect()
    }

    /// Possible spellings of `word`, nearest edit distance first.
    ///
    /// Returns the word itself when it is known or not checkable, and `None`
    /// when nothing within the configured distance is in the dictionary.
    pub fn candidates(&self, word: &str) -> Option<HashSet<String>> {
        let word = Self::normalize(word);

        if !self.should_check(&word) || self.dictionary.contains(&word) {
            return Some(HashSet::from([word]));
        }

        let first = self.edits1(&word);
        let known = self.known(&first);
        if !known.is_empty() {
            return Some(known);
        }

        if self.distance >= 2 {
            let mut second = HashSet::new();
            for edit in &first {
                for candidate in self.edits1(edit) {
                    if self.dictionary.contains(&candidate) {
                        second.insert(candidate);
                    }
                }
            }
            if !second.is_empty() {
                return Some(second);
            }
        }

        None
    }

    /// Up to `min(limit, 5)` replacements for an unknown word, most frequent
    /// first. Known words and words without candidates yield nothing.
    pub fn suggestions(&self, word: &str, limit: usize) -> Vec<String> {
        if !self.is_unknown(word) {
            return Vec::new();
        }

        let mut ranked: Vec<(u64, String)> = self
            .candidates(word)
            .unwrap_or_default()
            .into_iter()
            .map(|w| (self.dictionary.frequency(&w).unwrap_or(0), w))
            .collect();

        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        ranked
            .into_iter()
            .take(limit.min(MAX_SUGGESTIONS))
            .map(|(_, w)| w)
            .collect()
    }
}
