//! A single running game: its engine state, the scratchpad of tiles
//! staged but not yet committed, and the actor loop that serialises every
//! request a seated player makes against it.

use crate::{
    config::SETTINGS,
    error::{CoreError, CoreResult},
    events::{ClientMsg, GameStateView, PlacedTileView, ServerMsg},
    fsm::Core,
};
use scrabble::{
    game::{play::Play, tile::Tile, Game as Engine, PlayerNum},
    util::pos::Pos,
};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// A message sent to a game's actor task: who sent it, and what they asked.
pub struct GameMsg {
    pub player: PlayerNum,
    pub msg: ClientMsg,
}

/// A cheaply-cloneable handle to a running game. Cloning shares the same
/// underlying game and message queue; dropping every handle but the one
/// held by the actor task lets the game's own channel close naturally.
#[derive(Clone)]
pub struct GameHandle {
    sender: mpsc::UnboundedSender<GameMsg>,
}

impl GameHandle {
    /// Starts a game's actor task and returns a handle to it.
    pub fn create(core: Arc<Core>, player_count: usize, broadcast: mpsc::UnboundedSender<(PlayerNum, ServerMsg)>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let game = Arc::new(Mutex::new(Game::new(core, player_count)));

        tokio::spawn(async move {
            while let Some(GameMsg { player, msg }) = receiver.recv().await {
                let mut game = game.lock().await;
                let responses = game.on_msg(player, msg);
                for response in responses {
                    if broadcast.send(response).is_err() {
                        // every listener has gone; nothing left to deliver to.
                        return;
                    }
                }
            }
        });

        Self { sender }
    }

    /// Hands a request from `player` to the game's actor task.
    pub fn send(&self, player: PlayerNum, msg: ClientMsg) {
        let _ = self.sender.send(GameMsg { player, msg });
    }
}

/// The state of one running game: the engine, the tiles staged but not
/// yet committed by the player to move, and which players have asked to
/// end the game early.
pub struct Game {
    core: Arc<Core>,
    engine: Engine,
    /// Tiles staged by the player to move, keyed by board position so a
    /// repeated `place-tile` at the same cell simply overwrites it.
    pending: Vec<(Pos, Tile)>,
    /// Copied from [`SETTINGS`] at construction time rather than read from
    /// the global on every exchange, so a `Game` can be built in tests
    /// without requiring the process-wide environment to be configured.
    min_bag_for_exchange: usize,
}

impl Game {
    fn new(core: Arc<Core>, player_count: usize) -> Self {
        Self {
            core,
            engine: Engine::new(player_count),
            pending: Vec::new(),
            min_bag_for_exchange: SETTINGS.min_bag_for_exchange,
        }
    }

    /// Handles one request from `player`, returning every broadcast it
    /// produces (an error response is addressed back to the sender alone).
    fn on_msg(&mut self, player: PlayerNum, msg: ClientMsg) -> Vec<(PlayerNum, ServerMsg)> {
        if usize::from(player) >= self.engine.player_count() {
            return vec![(player, ServerMsg::Error(CoreError::NotInGame))];
        }

        let result = match msg {
            ClientMsg::PlaceTile { tile, row, col } => self.place_tile(player, tile, row, col),
            ClientMsg::RemoveTile { row, col } => self.remove_tile(player, row, col),
            ClientMsg::ClearPendingMove => self.clear_pending(player),
            ClientMsg::CommitMove => self.commit_move(player),
            ClientMsg::ExchangeTiles { tiles } => self.exchange_tiles(player, tiles),
            ClientMsg::PassTurn => self.pass_turn(player),
            ClientMsg::EndGame => self.end_game(player),
            ClientMsg::GetGameState => Ok(vec![(
                player,
                ServerMsg::GameStateUpdated(self.state_view(player)),
            )]),
        };

        match result {
            Ok(responses) => responses,
            Err(err) => vec![(player, ServerMsg::Error(err))],
        }
    }

    fn require_turn(&self, player: PlayerNum) -> CoreResult<()> {
        match self.engine.to_play() {
            Some(to_play) if to_play == player => Ok(()),
            _ => Err(CoreError::NotYourTurn),
        }
    }

    fn place_tile(
        &mut self,
        player: PlayerNum,
        tile: Tile,
        row: usize,
        col: usize,
    ) -> CoreResult<Vec<(PlayerNum, ServerMsg)>> {
        self.require_turn(player)?;

        let pos = Pos::from((row, col));
        if self.engine.board().get(pos).is_some() {
            return Err(CoreError::InvalidPosition);
        }

        let mut staged: Vec<Tile> = self.pending.iter().map(|&(_, t)| t).collect();
        staged.push(tile);
        if !self.engine.player(player).rack().contains(staged.into_iter()) {
            return Err(CoreError::TileNotOwned);
        }

        self.pending.retain(|&(p, _)| p != pos);
        self.pending.push((pos, tile));

        Ok(vec![(player, ServerMsg::GameStateUpdated(self.state_view(player)))])
    }

    fn remove_tile(
        &mut self,
        player: PlayerNum,
        row: usize,
        col: usize,
    ) -> CoreResult<Vec<(PlayerNum, ServerMsg)>> {
        self.require_turn(player)?;

        let pos = Pos::from((row, col));
        self.pending.retain(|&(p, _)| p != pos);

        Ok(vec![(player, ServerMsg::GameStateUpdated(self.state_view(player)))])
    }

    fn clear_pending(&mut self, player: PlayerNum) -> CoreResult<Vec<(PlayerNum, ServerMsg)>> {
        self.require_turn(player)?;
        self.pending.clear();

        Ok(vec![(player, ServerMsg::GameStateUpdated(self.state_view(player)))])
    }

    fn commit_move(&mut self, player: PlayerNum) -> CoreResult<Vec<(PlayerNum, ServerMsg)>> {
        self.require_turn(player)?;

        // Left in place until the play is confirmed valid, so a rejected
        // commit leaves the scratchpad intact for the player to retry.
        let placement = self.pending.clone();
        let play = Play::Place(placement.clone());

        let before = self.engine.player(player).score();
        self.engine.make_play(&play, self.core.lexicon())?;
        let after = self.engine.player(player).score();
        self.pending.clear();

        let mut responses = vec![(
            player,
            ServerMsg::MoveCommitted {
                player,
                tiles: placement.into_iter().map(PlacedTileView::from).collect(),
                score: after - before,
                next: self.engine.to_play(),
            },
        )];
        responses.extend(self.check_game_over());
        Ok(self.broadcast_to_all(responses))
    }

    fn exchange_tiles(
        &mut self,
        player: PlayerNum,
        tiles: Vec<Tile>,
    ) -> CoreResult<Vec<(PlayerNum, ServerMsg)>> {
        self.require_turn(player)?;

        if self.engine.letter_bag_len() < self.min_bag_for_exchange {
            return Err(CoreError::BagTooSmall);
        }
        if !self.engine.player(player).rack().contains(tiles.iter().copied()) {
            return Err(CoreError::TileNotOwned);
        }

        let count = tiles.len();
        self.engine.make_play(&Play::Redraw(tiles), self.core.lexicon())?;
        self.pending.clear();

        let responses = vec![(
            player,
            ServerMsg::TilesExchanged {
                player,
                count,
                next: self.engine.to_play(),
            },
        )];
        Ok(self.broadcast_to_all(responses))
    }

    fn pass_turn(&mut self, player: PlayerNum) -> CoreResult<Vec<(PlayerNum, ServerMsg)>> {
        self.require_turn(player)?;

        self.engine.make_play(&Play::Pass, self.core.lexicon())?;
        self.pending.clear();

        let mut responses = vec![(
            player,
            ServerMsg::TurnPassed {
                player,
                next: self.engine.to_play(),
            },
        )];
        responses.extend(self.check_game_over());
        Ok(self.broadcast_to_all(responses))
    }

    fn end_game(&mut self, player: PlayerNum) -> CoreResult<Vec<(PlayerNum, ServerMsg)>> {
        self.engine.end_game(player)?;

        let mut responses = vec![(player, ServerMsg::PlayerEndedGame { player })];
        responses.extend(self.check_game_over());
        Ok(self.broadcast_to_all(responses))
    }

    fn check_game_over(&self) -> Vec<(PlayerNum, ServerMsg)> {
        match self.engine.status() {
            scrabble::game::GameStatus::Over(over) => vec![(
                PlayerNum::first(),
                ServerMsg::GameOver {
                    reason: over.reason(),
                    scores: self.engine.player_nums().map(|p| over.score(p)).collect(),
                    winners: over.winners().map(|(p, _)| p).collect(),
                },
            )],
            scrabble::game::GameStatus::ToPlay(_) => Vec::new(),
        }
    }

    /// Fans a list of responses addressed to one player out to every seated
    /// player, since a committed move, exchange, pass or game-over is
    /// visible to the whole table.
    fn broadcast_to_all(&self, responses: Vec<(PlayerNum, ServerMsg)>) -> Vec<(PlayerNum, ServerMsg)> {
        responses
            .into_iter()
            .flat_map(|(_, msg)| self.engine.player_nums().map(move |p| (p, msg.clone())))
            .collect()
    }

    fn state_view(&self, player: PlayerNum) -> GameStateView {
        let board = Pos::iter()
            .filter_map(|pos| self.engine.board().get(pos).map(|tile| PlacedTileView::from((pos, tile))))
            .chain(self.pending.iter().map(|&(pos, tile)| PlacedTileView::from((pos, tile))))
            .collect();

        GameStateView {
            board,
            rack: self.engine.player(player).rack().iter().collect(),
            scores: self.engine.player_nums().map(|p| self.engine.player(p).score()).collect(),
            letter_bag_len: self.engine.letter_bag_len(),
            to_play: self.engine.to_play(),
            ended: self.engine.player_nums().filter(|&p| self.engine.has_ended(p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrabble::{
        error::GameError,
        game::{letter_bag::LetterBag, GameOverReason, GameStatus},
        util::pos::Direction,
    };

    // L = {CAT, CATS, AT, TO, SO, CAR, CARS, CAB, HAT, HATS}
    const WORDS: [&str; 10] = ["CAT", "CATS", "AT", "TO", "SO", "CAR", "CARS", "CAB", "HAT", "HATS"];

    fn tiles(letters: &str) -> Vec<Tile> {
        letters.chars().map(Tile::from).collect()
    }

    fn game(racks: &[&str]) -> Game {
        let racks = racks.iter().map(|r| tiles(r)).collect();
        Game {
            core: Arc::new(Core::from_words(WORDS.into_iter())),
            engine: Engine::new_with_racks(racks, LetterBag::default()),
            pending: Vec::new(),
            min_bag_for_exchange: 7,
        }
    }

    fn cats_at_start() -> Vec<(Pos, Tile)> {
        let start = Pos::start();
        "CATS"
            .chars()
            .enumerate()
            .map(|(i, c)| (start.offset(Direction::East, i).unwrap(), Tile::from(c)))
            .collect()
    }

    #[test]
    fn opening_move_scores_and_advances_turn() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);
        g.pending = cats_at_start();

        let responses = g.commit_move(PlayerNum::first()).unwrap();
        assert!(responses.iter().any(|(_, msg)| matches!(
            msg,
            ServerMsg::MoveCommitted { score: 12, next, .. } if *next == Some(PlayerNum::iter(2).nth(1).unwrap())
        )));
        assert_eq!(g.engine.turn_counter(), 1);
        assert!(g.pending.is_empty());
    }

    #[test]
    fn rejected_commit_keeps_pending_tiles_and_turn() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);
        // QQQQQQQ isn't in any rack; staging a tile not on the rack is
        // blocked earlier at `place_tile`, so exercise the commit-time
        // rejection path directly: stage a placement that forms no word
        // in the lexicon (a lone tile, off the start square).
        let bad = vec![(Pos::start().offset(Direction::East, 5).unwrap(), Tile::from('Z'))];
        g.pending = bad.clone();

        let err = g.commit_move(PlayerNum::first());
        assert!(err.is_err());
        assert_eq!(g.pending, bad);
        assert_eq!(g.engine.turn_counter(), 0);
    }

    #[test]
    fn hook_forming_invalid_word_is_rejected() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);
        g.pending = cats_at_start();
        g.commit_move(PlayerNum::first()).unwrap();

        // HCATS is not a lexicon word.
        let h_pos = Pos::start().offset(Direction::West, 1).unwrap();
        g.pending = vec![(h_pos, Tile::from('H'))];

        let second = PlayerNum::iter(2).nth(1).unwrap();
        let result = g.commit_move(second);
        assert!(matches!(
            result,
            Err(CoreError::Game(GameError::InvalidWord(_)))
        ));
        assert_eq!(g.engine.turn_counter(), 1);
    }

    #[test]
    fn not_your_turn_is_rejected() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);
        let second = PlayerNum::iter(2).nth(1).unwrap();

        let result = g.place_tile(second, Tile::from('H'), 7, 7);
        assert!(matches!(result, Err(CoreError::NotYourTurn)));
    }

    #[test]
    fn exchange_preserves_tile_conservation_and_bag_size() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);
        let bag_before = g.engine.letter_bag_len();
        let rack_before = g.engine.player(PlayerNum::first()).rack().len();

        g.exchange_tiles(PlayerNum::first(), tiles("CAT")).unwrap();

        assert_eq!(g.engine.letter_bag_len(), bag_before);
        assert_eq!(g.engine.player(PlayerNum::first()).rack().len(), rack_before);
        assert_eq!(g.engine.turn_counter(), 1);
    }

    #[test]
    fn exchange_below_min_bag_is_rejected() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);
        g.engine = Engine::new_with_racks(
            vec![tiles("CATSXYZ"), tiles("HATOEIN")],
            LetterBag::from([0; 27]),
        );

        let result = g.exchange_tiles(PlayerNum::first(), tiles("CAT"));
        assert!(matches!(result, Err(CoreError::BagTooSmall)));
    }

    #[test]
    fn six_passes_ends_game() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);

        for i in 0..6 {
            let player = PlayerNum::iter(2).nth(i % 2).unwrap();
            g.pass_turn(player).unwrap();
        }

        assert_eq!(g.engine.turn_counter(), 6);
        match g.engine.status() {
            GameStatus::Over(over) => assert!(matches!(over.reason(), GameOverReason::SixPasses)),
            GameStatus::ToPlay(_) => panic!("expected game over after six passes"),
        }
    }

    #[test]
    fn all_players_ending_finishes_the_game() {
        let mut g = game(&["CATSXYZ", "HATOEIN"]);

        let first = PlayerNum::first();
        let second = PlayerNum::iter(2).nth(1).unwrap();

        g.end_game(first).unwrap();
        assert!(!g.engine.status().is_over());

        let responses = g.end_game(second).unwrap();
        assert!(matches!(g.engine.status(), GameStatus::Over(_)));
        assert!(responses
            .iter()
            .any(|(_, msg)| matches!(msg, ServerMsg::GameOver { reason: GameOverReason::PlayersEnded, .. })));
    }
}
