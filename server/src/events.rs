//! The JSON wire contract (§6): requests a client may send once seated in
//! a game, and the broadcasts a game sends back to every participant in
//! response. Framing and delivery belong to the transport collaborator;
//! this module only fixes the shapes that cross the wire.

use crate::error::CoreError;
use scrabble::{
    game::{tile::Tile, GameOverReason, PlayerNum},
    util::pos::Pos,
};
use serde::{Deserialize, Serialize};

/// A request sent by a seated client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMsg {
    /// Stages a tile from the sender's rack onto an empty board cell,
    /// without committing it.
    PlaceTile { tile: Tile, row: usize, col: usize },
    /// Withdraws a previously staged tile back to the rack.
    RemoveTile { row: usize, col: usize },
    /// Withdraws every tile staged so far.
    ClearPendingMove,
    /// Commits the tiles staged so far as this turn's play.
    CommitMove,
    /// Exchanges the given rack tiles for new ones, ending the turn.
    ExchangeTiles { tiles: Vec<Tile> },
    /// Forfeits the turn with no placement or exchange.
    PassTurn,
    /// Marks the sender as wanting to end the game early.
    EndGame,
    /// Requests a fresh snapshot of the full game state.
    GetGameState,
}

/// A broadcast sent by a game to its seated clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    /// A full snapshot of the game, sent in response to
    /// [`ClientMsg::GetGameState`] or on seating.
    GameStateUpdated(GameStateView),
    /// A player committed a placement.
    MoveCommitted {
        player: PlayerNum,
        tiles: Vec<PlacedTileView>,
        score: usize,
        next: Option<PlayerNum>,
    },
    /// A player exchanged tiles.
    TilesExchanged {
        player: PlayerNum,
        count: usize,
        next: Option<PlayerNum>,
    },
    /// A player passed.
    TurnPassed { player: PlayerNum, next: Option<PlayerNum> },
    /// A player marked themselves as done with the game.
    PlayerEndedGame { player: PlayerNum },
    /// The game has finished.
    GameOver {
        reason: GameOverReason,
        scores: Vec<usize>,
        winners: Vec<PlayerNum>,
    },
    /// A request could not be satisfied.
    Error(CoreError),
}

/// One placed tile, as reported in a [`ServerMsg::MoveCommitted`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedTileView {
    pub tile: Tile,
    pub row: usize,
    pub col: usize,
}
impl From<(Pos, Tile)> for PlacedTileView {
    fn from((pos, tile): (Pos, Tile)) -> Self {
        Self {
            tile,
            row: usize::from(pos.row()),
            col: usize::from(pos.col()),
        }
    }
}

/// A full snapshot of one player's visible state: their own rack, every
/// player's score, and whose turn it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateView {
    pub board: Vec<PlacedTileView>,
    pub rack: Vec<Tile>,
    pub scores: Vec<usize>,
    pub letter_bag_len: usize,
    pub to_play: Option<PlayerNum>,
    pub ended: Vec<PlayerNum>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_msg_tags_are_kebab_case() {
        let json = serde_json::to_value(ClientMsg::PassTurn).unwrap();
        assert_eq!(json["type"], "pass-turn");

        let json = serde_json::to_value(ClientMsg::ExchangeTiles { tiles: vec![Tile::from('A')] }).unwrap();
        assert_eq!(json["type"], "exchange-tiles");
        assert_eq!(json["tiles"][0], "A");
    }

    #[test]
    fn client_msg_round_trips_through_json() {
        let sent = ClientMsg::PlaceTile { tile: Tile::from('Q'), row: 7, col: 7 };
        let json = serde_json::to_string(&sent).unwrap();
        let back: ClientMsg = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, ClientMsg::PlaceTile { row: 7, col: 7, .. }));
    }

    #[test]
    fn server_msg_game_over_round_trips() {
        let second_player = PlayerNum::first().next(2);
        let sent = ServerMsg::GameOver {
            reason: GameOverReason::SixPasses,
            scores: vec![10, 20],
            winners: vec![second_player],
        };
        let json = serde_json::to_string(&sent).unwrap();
        let back: ServerMsg = serde_json::from_str(&json).unwrap();
        match back {
            ServerMsg::GameOver { scores, winners, .. } => {
                assert_eq!(scores, vec![10, 20]);
                assert_eq!(winners, vec![second_player]);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
