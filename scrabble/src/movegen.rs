//! Move generator (C5): Gordon's algorithm, driven by the GADDAG
//! ([`crate::util::gaddag`]), finds every legal placement a rack can make
//! against a board. The generator never validates words itself beyond what
//! the GADDAG and the cross-check masks already guarantee; scoring (and a
//! final confirming validation) is delegated to [`Board::make_placement`],
//! the same entry point the commit pipeline uses, so a generated candidate
//! and a hand-played move are checked identically.

use crate::{
    game::{
        board::Board,
        tile::{Letter, Tile},
    },
    lexicon::Lexicon,
    util::{
        fsm::{Fsm, StateId, Symbol},
        pos::{Direction, Pos},
        tile_counts::TileCounts,
    },
};
use std::collections::{HashMap, HashSet};

/// Bitmask covering all 26 letters, used where a cross-check position has
/// no perpendicular neighbours and so admits any letter.
const ALL_LETTERS: u32 = (1 << 26) - 1;

/// A single newly placed tile, as found by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    /// The board position of the tile.
    pub pos: Pos,
    /// The tile placed there.
    pub tile: Tile,
}

/// A candidate move: a set of newly placed tiles and the score it would
/// earn if played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The tiles placed by this candidate.
    pub tiles: Vec<PlacedTile>,
    /// The score this candidate would earn.
    pub score: usize,
}

/// Finds every legal placement `rack` can make against `board`, according
/// to `lexicon` and `gaddag` (which must have been built from the same
/// lexicon). Runs Gordon's algorithm independently over every anchor and
/// direction, then deduplicates candidates that more than one anchor in
/// the same run of empty cells could otherwise emit twice.
pub fn generate<'c, F: Fsm<'c, Symbol>>(
    board: &'c Board,
    lexicon: &'c Lexicon,
    gaddag: &'c F,
    rack: &TileCounts,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let cap = rack.len().min(7);

    for &dir in &[Direction::East, Direction::South] {
        for anchor in anchors(board) {
            let limit = left_limit(board, anchor, dir, cap);

            let mut state = GenState {
                board,
                lexicon,
                gaddag,
                anchor,
                dir,
                left_limit: limit,
                cross_checks: HashMap::new(),
                rack: *rack,
                placed: Vec::new(),
                candidates: Vec::new(),
            };

            state.gen(0, gaddag.initial_state());
            candidates.extend(state.candidates);
        }
    }

    dedup_candidates(candidates)
}

/// Steps `delta` squares from `anchor` in `dir` (negative before, positive
/// after, zero is the anchor itself).
fn step(anchor: Pos, dir: Direction, delta: isize) -> Option<Pos> {
    match delta {
        0 => Some(anchor),
        d if d > 0 => anchor.offset(dir, d as usize),
        d => anchor.offset(dir.opposite(), (-d) as usize),
    }
}

/// Every empty square adjacent to an occupied one, plus the centre square
/// when the board is empty.
fn anchors(board: &Board) -> Vec<Pos> {
    let occ = *board.occ_h();

    if occ.is_zero() {
        return vec![Pos::start()];
    }

    occ.neighbours().into_iter().collect()
}

/// The number of consecutive empty squares immediately before `anchor`
/// along `dir`, capped at `cap` tiles (the rack can never place more).
fn left_limit(board: &Board, anchor: Pos, dir: Direction, cap: usize) -> isize {
    let mut count = 0;
    let mut pos = anchor;

    while count < cap {
        match pos.offset(dir.opposite(), 1) {
            Some(p) if board.get(p).is_none() => {
                count += 1;
                pos = p;
            }
            _ => break,
        }
    }

    count as isize
}

/// Holds the state threaded through one anchor/direction pass of Gordon's
/// algorithm: the board and rack being searched, the GADDAG state, and the
/// in-progress stack of newly placed tiles.
struct GenState<'c, F: Fsm<'c, Symbol>> {
    board: &'c Board,
    lexicon: &'c Lexicon,
    gaddag: &'c F,
    anchor: Pos,
    dir: Direction,
    left_limit: isize,
    cross_checks: HashMap<Pos, u32>,
    rack: TileCounts,
    placed: Vec<PlacedTile>,
    candidates: Vec<Candidate>,
}

impl<'c, F: Fsm<'c, Symbol>> GenState<'c, F> {
    /// Extends the word at `delta` squares from the anchor. If the square
    /// is occupied, follows the existing letter through the GADDAG; if
    /// empty, tries every rack letter (and blank) whose cross-check mask
    /// permits it.
    fn gen(&mut self, delta: isize, node: StateId) {
        let pos = match step(self.anchor, self.dir, delta) {
            Some(pos) => pos,
            None => return,
        };

        match self.board.get(pos) {
            Some(tile) => {
                let letter = tile
                    .letter()
                    .expect("a tile already on the board has a resolved letter");

                if let Some(child) = self.gaddag.transition(node, &Symbol::Letter(letter)) {
                    self.go_on(delta, child);
                }
            }
            None => {
                let mask = self.cross_check(pos);

                for letter in Letter::iter() {
                    if mask & (1 << usize::from(letter)) == 0 {
                        continue;
                    }

                    let child = match self.gaddag.transition(node, &Symbol::Letter(letter)) {
                        Some(child) => child,
                        None => continue,
                    };

                    if self.rack.any(Tile::Letter(letter)) {
                        self.rack.remove_one(Tile::Letter(letter));
                        self.placed.push(PlacedTile {
                            pos,
                            tile: Tile::Letter(letter),
                        });

                        self.go_on(delta, child);

                        self.placed.pop();
                        self.rack.insert_one(Tile::Letter(letter));
                    }

                    if self.rack.any(Tile::blank()) {
                        self.rack.remove_one(Tile::blank());
                        self.placed.push(PlacedTile {
                            pos,
                            tile: Tile::Blank(Some(letter)),
                        });

                        self.go_on(delta, child);

                        self.placed.pop();
                        self.rack.insert_one(Tile::blank());
                    }
                }
            }
        }
    }

    /// Having just transitioned into `node` at `delta`, checks whether the
    /// word-so-far can legally end here, then continues the traversal:
    /// leftward towards (and past) the anchor, or, once the separator has
    /// been crossed, rightward from it.
    fn go_on(&mut self, delta: isize, node: StateId) {
        if delta <= 0 {
            if self.gaddag.is_terminal(node) && self.boundary_open(delta - 1) && self.has_placed() {
                self.record();
            }

            if delta > -self.left_limit {
                self.gen(delta - 1, node);
            }

            // Every node along the left-building chain is a potential split
            // point: if it has a transition on the separator, begin
            // building rightward from the anchor's right-hand neighbour.
            if let Some(next) = self.gaddag.transition(node, &Symbol::Separator) {
                self.gen(1, next);
            }
        } else {
            if self.gaddag.is_terminal(node) && self.boundary_open(delta + 1) && self.has_placed() {
                self.record();
            }

            self.gen(delta + 1, node);
        }
    }

    /// Whether the square `delta` steps from the anchor is empty or off the
    /// board — the condition for a word to legally end at the square before it.
    fn boundary_open(&self, delta: isize) -> bool {
        match step(self.anchor, self.dir, delta) {
            Some(pos) => self.board.get(pos).is_none(),
            None => true,
        }
    }

    fn has_placed(&self) -> bool {
        !self.placed.is_empty()
    }

    /// Scores and records the current placement by replaying it through
    /// [`Board::make_placement`] on a scratch copy of the board — the same
    /// validation and scoring path the commit pipeline uses, so every
    /// candidate the generator emits is one the pipeline would also accept.
    fn record(&mut self) {
        let mut board = self.board.clone();
        let tile_positions: Vec<(Pos, Tile)> =
            self.placed.iter().map(|p| (p.pos, p.tile)).collect();

        if let Ok(score) = board.make_placement(&tile_positions, self.lexicon) {
            self.candidates.push(Candidate {
                tiles: self.placed.clone(),
                score,
            });
        }
    }

    /// The mask of letters that may legally occupy `pos`, considering only
    /// the perpendicular direction to this pass. Cached per position since
    /// a single anchor/direction pass may revisit the same square.
    fn cross_check(&mut self, pos: Pos) -> u32 {
        if let Some(&mask) = self.cross_checks.get(&pos) {
            return mask;
        }

        let mask = self.compute_cross_check(pos);
        self.cross_checks.insert(pos, mask);
        mask
    }

    fn compute_cross_check(&self, pos: Pos) -> u32 {
        let cross_dir = self.dir.perpendicular();

        let mut before = Vec::new();
        let mut p = pos;
        while let Some(q) = p.offset(cross_dir.opposite(), 1) {
            match self.board.get(q) {
                Some(tile) => {
                    before.push(tile.letter().expect("board tile has a resolved letter"));
                    p = q;
                }
                None => break,
            }
        }
        before.reverse();

        let mut after = Vec::new();
        let mut p = pos;
        while let Some(q) = p.offset(cross_dir, 1) {
            match self.board.get(q) {
                Some(tile) => {
                    after.push(tile.letter().expect("board tile has a resolved letter"));
                    p = q;
                }
                None => break,
            }
        }

        if before.is_empty() && after.is_empty() {
            return ALL_LETTERS;
        }

        let mut mask = 0;
        for letter in Letter::iter() {
            let mut word = before.clone();
            word.push(letter);
            word.extend(after.iter().copied());

            if self.lexicon.contains_letters(word.into_iter()) {
                mask |= 1 << usize::from(letter);
            }
        }

        mask
    }
}

/// A single run of empty cells may expose the same placement to more than
/// one anchor within it; keep only the first occurrence of each distinct
/// set of placed positions.
fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| {
            let mut key: Vec<usize> = c.tiles.iter().map(|t| usize::from(t.pos)).collect();
            key.sort_unstable();
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::gaddag;
    use crate::util::fsm::FastFsm;

    fn lexicon() -> Lexicon {
        Lexicon::from_words(
            ["CAT", "CATS", "AT", "TO", "SO", "CAR", "CARS", "CAB", "HAT", "HATS"].into_iter(),
        )
    }

    fn rack(tiles: &str) -> TileCounts {
        TileCounts::from_iter(tiles.chars().map(Tile::from))
    }

    #[test]
    fn opening_move_is_found() {
        let lexicon = lexicon();
        let gaddag: FastFsm<Symbol> = gaddag::build(&lexicon);
        let board = Board::default();
        let rack = rack("CATSXYZ");

        let candidates = generate(&board, &lexicon, &gaddag, &rack);

        let expected: Vec<PlacedTile> = "CATS"
            .chars()
            .enumerate()
            .map(|(i, ch)| PlacedTile {
                pos: Pos::start().offset(Direction::East, i).unwrap(),
                tile: Tile::from(ch),
            })
            .collect();

        let found = candidates
            .iter()
            .find(|c| c.tiles.len() == expected.len() && expected.iter().all(|t| c.tiles.contains(t)));

        let candidate = found.expect("CATS through the centre should be found");
        assert_eq!(candidate.score, 12);
    }

    #[test]
    fn unusable_rack_yields_nothing() {
        let lexicon = lexicon();
        let gaddag: FastFsm<Symbol> = gaddag::build(&lexicon);
        let board = Board::default();
        // None of these letters appear together in any lexicon word.
        let rack = rack("QQQQQQQ");

        assert!(generate(&board, &lexicon, &gaddag, &rack).is_empty());
    }

    #[test]
    fn every_candidate_passes_the_commit_pipeline() {
        let lexicon = lexicon();
        let gaddag: FastFsm<Symbol> = gaddag::build(&lexicon);
        let board = Board::default();
        let rack = rack("CATSXYZ");

        let candidates = generate(&board, &lexicon, &gaddag, &rack);
        assert!(!candidates.is_empty());

        for candidate in candidates {
            let mut board = board.clone();
            let tile_positions: Vec<(Pos, Tile)> =
                candidate.tiles.iter().map(|t| (t.pos, t.tile)).collect();

            let score = board
                .make_placement(&tile_positions, &lexicon)
                .expect("generated candidate should pass the commit pipeline");
            assert_eq!(score, candidate.score);
        }
    }
}
