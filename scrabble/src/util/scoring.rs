//! Module for validating and scoring the words formed by a play.
//!
//! Word legality is always checked against the [`Lexicon`] — the exact
//! membership oracle — never by walking the GADDAG; the GADDAG exists only
//! to drive move generation (§3, §9).

use crate::{
    error::{GameError, GameResult},
    game::{board::Board, tile::Letter},
    lexicon::Lexicon,
    util::{bitboard::BitBoard, words::Word},
};

/// Validates every word in `words` against `lexicon`, then sums their
/// scores. `new` marks the newly placed tiles; only cells covered by `new`
/// receive letter/word multiplier premiums (§4.5 — a premium is consumed
/// only by the tile that first covers it). If any word fails lexicon
/// validation, returns `GameError::InvalidWord` naming every offending
/// word; no partial score is returned in that case.
pub fn validate_and_score(
    words: impl Iterator<Item = Word>,
    new: BitBoard,
    board: &Board,
    lexicon: &Lexicon,
) -> GameResult<usize> {
    let words: Vec<(Word, Vec<Letter>)> = words
        .map(|word| {
            let letters = word
                .into_iter()
                .map(|pos| {
                    board
                        .get(pos)
                        .expect("word position should be occupied")
                        .letter()
                        .expect("blank should have a chosen letter by commit time")
                })
                .collect();
            (word, letters)
        })
        .collect();

    let invalid: Vec<String> = words
        .iter()
        .filter(|(_, letters)| !lexicon.contains_letters(letters.iter().copied()))
        .map(|(_, letters)| letters.iter().copied().map(char::from).collect())
        .collect();

    if !invalid.is_empty() {
        return Err(GameError::InvalidWord(invalid));
    }

    Ok(words
        .into_iter()
        .map(|(word, _)| score_word(word, &new, board))
        .sum())
}

/// Sums a single word's score, applying letter/word multipliers only to
/// newly placed tiles.
fn score_word(word: Word, new: &BitBoard, board: &Board) -> usize {
    let mut score = 0;
    let mut word_multiplier = 1;

    for pos in word {
        let tile = board.get(pos).expect("word position should be occupied");

        let (tile_multiplier, word_m) = match new.is_set(pos) {
            true => pos.premium_multipliers(),
            false => (1, 1),
        };

        word_multiplier *= word_m;
        score += tile_multiplier * tile.score();
    }

    word_multiplier * score
}
