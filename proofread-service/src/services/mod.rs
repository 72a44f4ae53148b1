pub mod grammar;
pub mod metrics;
pub mod spelling;

pub use grammar::{GrammarCorrector, GrammarError, HfGrammarCorrector, MockGrammarCorrector};
pub use spelling::{Dictionary, DictionaryError, SpellChecker};
