//! Builds the GADDAG (§4.1): a [`Symbol`]-alphabet automaton over a
//! [`Lexicon`] that supports extending a word both left and right from any
//! anchor letter. The GADDAG is used by the move generator
//! ([`crate::movegen`]) only; word validity at commit time is always
//! checked against the [`Lexicon`] directly, never by GADDAG traversal.

use crate::{
    game::tile::Letter,
    lexicon::Lexicon,
    util::fsm::{Fsm, FsmBuilder, Symbol},
};

/// Builds every path for a single word: for a word `W = w_1 w_2 ... w_n`,
/// the paths are `reverse(w_1..=w_i) Separator w_{i+1}..=w_n` for each split
/// point `1 <= i < n`, plus the full reversal `reverse(w_1..=w_n)` with no
/// separator for `i = n`.
fn word_paths(word: &[Letter]) -> Vec<Vec<Symbol>> {
    let n = word.len();
    let mut paths = Vec::with_capacity(n);

    for i in 1..n {
        let mut path: Vec<Symbol> = word[0..i]
            .iter()
            .rev()
            .map(|&l| Symbol::Letter(l))
            .collect();
        path.push(Symbol::Separator);
        path.extend(word[i..].iter().map(|&l| Symbol::Letter(l)));
        paths.push(path);
    }

    paths.push(word.iter().rev().map(|&l| Symbol::Letter(l)).collect());

    paths
}

/// Builds a GADDAG automaton of implementation `F` from every word in
/// `lexicon`. Construction is offline and single-threaded: every path for
/// every word is generated, sorted once (the builder requires ascending
/// insertion order), deduplicated (distinct words can share a path prefix
/// exactly, e.g. two words differing only after the split point never
/// collide, but the final, separator-less reversal path can coincide for
/// anagrams), and fed to the shared register-minimizing [`FsmBuilder`].
pub fn build<'a, F: Fsm<'a, Symbol>>(lexicon: &Lexicon) -> F {
    let mut all_paths: Vec<Vec<Symbol>> = Vec::new();

    for word in lexicon.iter() {
        all_paths.extend(word_paths(&word));
    }

    all_paths.sort();
    all_paths.dedup();

    let mut builder = FsmBuilder::default();
    for path in &all_paths {
        builder.insert(path.as_slice());
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::fsm::FastFsm;

    fn letters(word: &str) -> Vec<Letter> {
        word.chars().filter_map(Letter::new).collect()
    }

    #[test]
    fn every_split_path_is_accepted() {
        let lexicon = Lexicon::from_words(["cat", "cats", "at", "car"].into_iter());
        let gaddag: FastFsm<Symbol> = build(&lexicon);

        for word in ["cat", "cats", "at", "car"] {
            let w = letters(word);
            for path in word_paths(&w) {
                assert!(
                    gaddag.traverse(path.as_slice()).map(|s| gaddag.is_terminal(s)).unwrap_or(false),
                    "path for {word} should be accepted"
                );
            }
        }
    }

    #[test]
    fn unrelated_path_is_rejected() {
        let lexicon = Lexicon::from_words(["cat"].into_iter());
        let gaddag: FastFsm<Symbol> = build(&lexicon);

        let bogus = vec![Symbol::Letter(Letter::new('x').unwrap())];
        assert!(gaddag
            .traverse(bogus.as_slice())
            .map(|s| !gaddag.is_terminal(s))
            .unwrap_or(true));
    }
}
