//! Loads the lexicon and builds the GADDAG once at startup, then shares
//! both behind an `Arc` — immutable for the life of the process, exactly
//! as §5.1/§9 require.

use scrabble::{
    lexicon::Lexicon,
    util::{
        fsm::{Symbol, SmallFsm},
        gaddag,
    },
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    sync::Arc,
};

/// The shared, immutable lexicon and GADDAG every game in the process
/// generates moves and validates words against.
#[derive(Clone)]
pub struct Core {
    lexicon: Arc<Lexicon>,
    gaddag: Arc<SmallFsm<Symbol>>,
}

impl Core {
    /// Reads the word list at `path`, one word per line, building both the
    /// exact-membership [`Lexicon`] and the GADDAG move-generation index
    /// from it.
    pub fn load(path: &str) -> std::io::Result<Self> {
        log::info!("loading lexicon: {path}");

        let file = File::open(path)?;
        let words: Vec<String> = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<_>>()?;

        log::info!("building gaddag from {} words", words.len());
        Ok(Self::from_words(words.iter().map(String::as_str)))
    }

    /// Builds a [`Core`] directly from a word list, skipping the file read.
    /// Used by tests and by [`Core::load`] itself.
    pub fn from_words<'a>(words: impl Iterator<Item = &'a str>) -> Self {
        let lexicon = Lexicon::from_words(words);
        let gaddag: SmallFsm<Symbol> = gaddag::build(&lexicon);

        Self {
            lexicon: Arc::new(lexicon),
            gaddag: Arc::new(gaddag),
        }
    }

    /// Borrows the lexicon.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
    /// Borrows the GADDAG.
    pub fn gaddag(&self) -> &SmallFsm<Symbol> {
        &self.gaddag
    }
}
