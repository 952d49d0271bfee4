//! Models the scrabble board.

use crate::{
    error::{GameError, GameResult},
    game::tile::Tile,
    lexicon::Lexicon,
    util::{
        self,
        bitboard::BitBoard,
        pos::Pos,
        scoring,
        words::WordsIteratorExt,
    },
};
use std::fmt;

/// The number of rows on the board.
pub const ROWS: usize = 15;
/// The number of columns on the board.
pub const COLS: usize = 15;
/// The number of squares on the board.
pub const CELLS: usize = 15 * 15;

/// Represents the 15 x 15 scrabble board, storing the location of
/// tiles, and allowing [`Play`](super::play::Play)s to be made
/// and validated.
#[derive(Clone, Debug)]
pub struct Board {
    grid: [Option<Tile>; CELLS],
    /// regular occupancy, for finding horizontal words.
    occ_h: BitBoard,
    /// vertical occupancy, rotated 90deg. For finding vertical words.
    occ_v: BitBoard,
}
impl Board {
    /// Validates and scores a placement. Only words that contain at least
    /// one newly placed tile are considered (§4.5) — both the main word and
    /// any cross-words fall out of the same horizontal/vertical enumeration,
    /// restricted to boundaries intersecting `new_h`/`new_v`. Returns an
    /// error listing every offending word if any fails lexicon validation;
    /// no partial score is returned in that case. Adds the 50 point bingo
    /// bonus when `new_h` covers exactly seven squares.
    fn score_and_validate(
        &self,
        new_h: BitBoard,
        new_v: BitBoard,
        lexicon: &Lexicon,
    ) -> GameResult<usize> {
        let words_h = (self.occ_h | new_h).word_boundaries().intersecting(new_h).horizontal();
        let words_v = (self.occ_v | new_v).word_boundaries().intersecting(new_v).vertical();

        let score = scoring::validate_and_score(words_h.chain(words_v), new_h, self, lexicon)?;

        match new_h.bit_count() {
            7 => Ok(score + 50),
            _ => Ok(score),
        }
    }
    /// Gets an iterator over every word currently on the board.
    pub fn words(&self) -> impl Iterator<Item = crate::util::words::Word> {
        let words_h = self.occ_h.word_boundaries().horizontal();
        let words_v = self.occ_v.word_boundaries().vertical();

        words_h.chain(words_v)
    }
    /// Gets the board occupancy.
    pub fn occ_h(&self) -> &BitBoard {
        &self.occ_h
    }
    /// Gets the rotated board occupancy.
    pub fn occ_v(&self) -> &BitBoard {
        &self.occ_v
    }
    /// Gets the tile at `pos`
    pub fn get(&self, pos: impl Into<Pos>) -> Option<Tile> {
        self.grid[usize::from(pos.into())]
    }
    /// Removes all tiles in `tile_positions` from the board.
    pub fn undo_placement(&mut self, tile_positions: Vec<Pos>) {
        for pos in tile_positions {
            self.grid[usize::from(pos)] = None;
            self.occ_h.clear(pos);
            self.occ_v.clear(pos.anti_clockwise90());
        }
    }
    /// Attempts to perform a [`Play::Place`](super::play::Play::Place)
    /// on the board. (All other variants don't require board modification).
    /// If succesful, returns the score from placing the new tiles.
    pub fn make_placement(
        &mut self,
        tile_positions: &[(Pos, Tile)],
        lexicon: &Lexicon,
    ) -> GameResult<usize> {
        if tile_positions.is_empty() || tile_positions.len() > 7 {
            return Err(GameError::PlacementCount);
        }

        let all_same_row = tile_positions
            .windows(2)
            .all(|w| w[0].0.row() == w[1].0.row());
        let all_same_col = tile_positions
            .windows(2)
            .all(|w| w[0].0.col() == w[1].0.col());
        if !all_same_row && !all_same_col {
            return Err(GameError::NoCommonLine);
        }

        // new tiles for horizontal words
        let mut new_h = BitBoard::default();
        // new tiles for vertical words: rotated 90deg anticlockwise
        let mut new_v = BitBoard::default();

        for &(pos_h, _) in tile_positions {
            // if the bit has already been set then `tile_positions` contains
            // a duplicate tile.
            if new_h.is_set(pos_h) {
                return Err(GameError::DuplicatePosition);
            }

            new_h.set(pos_h);
            new_v.set(pos_h.anti_clockwise90());
        }

        // The union of old and new tiles between the minimum and maximum
        // staged position along the main direction must have no gaps: a
        // move staging tiles either side of an empty cell is not one word.
        let occ = self.occ_h | new_h;
        let line: Box<dyn Iterator<Item = Pos>> = if all_same_row {
            let row = tile_positions[0].0.row();
            let cols = tile_positions.iter().map(|(pos, _)| usize::from(pos.col()));
            let (min, max) = (cols.clone().min().unwrap(), cols.max().unwrap());
            Box::new((min..=max).map(move |col| Pos::from((row, col))))
        } else {
            let col = tile_positions[0].0.col();
            let rows = tile_positions.iter().map(|(pos, _)| usize::from(pos.row()));
            let (min, max) = (rows.clone().min().unwrap(), rows.max().unwrap());
            Box::new((min..=max).map(move |row| Pos::from((row, col))))
        };
        if line.into_iter().any(|pos| !occ.is_set(pos)) {
            return Err(GameError::NotContiguous);
        }

        // perform tile placement validation
        util::validate_occ_h(self.occ_h, new_h)?;

        // Tiles positions have now been validated: place the tiles on the board.
        // Word validation requires that these tiles are present. If an invalid
        // word exists on the board, the tiles will be removed.
        for &(pos, tile) in tile_positions {
            self.grid[usize::from(pos)] = Some(tile);
        }

        // checks that words are valid then returns the score
        match self.score_and_validate(new_h, new_v, lexicon) {
            // everything was ok, update the bitboards.
            Ok(score) => {
                // update bitboards
                self.occ_h |= new_h;
                self.occ_v |= new_v;

                Ok(score)
            }
            // error occured, reverse the state change
            Err(e) => {
                // clear all modified squares
                tile_positions
                    .iter()
                    .for_each(|(pos, _)| self.grid[usize::from(*pos)] = None);

                Err(e)
            }
        }
    }
}
impl Default for Board {
    fn default() -> Self {
        Self {
            grid: [None; CELLS],
            occ_h: BitBoard::default(),
            occ_v: BitBoard::default(),
        }
    }
}
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        util::write_grid(f, |pos| match self.get(pos) {
            Some(tile) => format!("{}", tile),
            None => " . ".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A small lexicon local to this test, chosen to make the prior-moves
    // setup easy rather than reusing the shared CAT/CATS word list.
    fn lexicon() -> Lexicon {
        Lexicon::from_words(["CAB", "CAT", "BAT"].into_iter())
    }

    #[test]
    fn gap_between_staged_tiles_is_rejected() {
        let lexicon = lexicon();
        let mut board = Board::default();

        // Row 7, cols 5-7: "CAB", covering the start square at (7,7).
        board
            .make_placement(
                &[
                    (Pos::from((7, 5)), Tile::from('C')),
                    (Pos::from((7, 6)), Tile::from('A')),
                    (Pos::from((7, 7)), Tile::from('B')),
                ],
                &lexicon,
            )
            .unwrap();
        // Col 5, rows 7-9: extends the existing 'C' at (7,5) into "CAT".
        board
            .make_placement(
                &[(Pos::from((8, 5)), Tile::from('A')), (Pos::from((9, 5)), Tile::from('T'))],
                &lexicon,
            )
            .unwrap();
        // Col 7, rows 7-9: extends the existing 'B' at (7,7) into "BAT".
        board
            .make_placement(
                &[(Pos::from((8, 7)), Tile::from('A')), (Pos::from((9, 7)), Tile::from('T'))],
                &lexicon,
            )
            .unwrap();

        // (9,5) and (9,7) are each committed and individually connected
        // back to the board. Stage row 10 at cols 5 and 7, leaving (10,6)
        // empty: this must be rejected even though each staged tile has an
        // orthogonal neighbour and forms no horizontal word of its own.
        let left = Pos::from((10, 5));
        let right = Pos::from((10, 7));

        let result = board.make_placement(&[(left, Tile::from('S')), (right, Tile::from('S'))], &lexicon);

        assert!(matches!(result, Err(GameError::NotContiguous)));
        assert!(board.get(left).is_none());
        assert!(board.get(right).is_none());
    }

    #[test]
    fn ordinary_contiguous_placement_still_succeeds() {
        let lexicon = lexicon();
        let mut board = Board::default();

        let score = board
            .make_placement(
                &[
                    (Pos::from((7, 5)), Tile::from('C')),
                    (Pos::from((7, 6)), Tile::from('A')),
                    (Pos::from((7, 7)), Tile::from('B')),
                ],
                &lexicon,
            )
            .unwrap();

        assert!(score > 0);
        assert_eq!(board.get(Pos::from((7, 7))), Some(Tile::from('B')));
    }
}
