//! Keeps track of every running game in the process, and the broadcast
//! channel each one feeds into so the transport collaborator can fan its
//! messages out to the right sockets.

use crate::{events::ServerMsg, fsm::Core, game::GameHandle};
use scrabble::game::PlayerNum;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI32, Ordering},
        Arc,
    },
};
use tokio::sync::{mpsc, RwLock};

/// A thread-safe, shareable store of every running game.
#[derive(Clone)]
pub struct GamesHandle(Arc<RwLock<HashMap<i32, GameHandle>>>);

impl GamesHandle {
    /// Creates an empty game store.
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(HashMap::new())))
    }

    /// Starts a new game with `player_count` seats, returning its id and a
    /// receiver for every message the game broadcasts to its players.
    pub async fn insert(
        &self,
        core: Arc<Core>,
        player_count: usize,
    ) -> (i32, mpsc::UnboundedReceiver<(PlayerNum, ServerMsg)>) {
        static NEXT_ID: AtomicI32 = AtomicI32::new(1);
        let id_game = NEXT_ID.fetch_add(1, Ordering::Relaxed);

        let (broadcast, receiver) = mpsc::unbounded_channel();
        let handle = GameHandle::create(core, player_count, broadcast);

        self.0.write().await.insert(id_game, handle);
        (id_game, receiver)
    }

    /// Gets the handle for a running game, if one exists with that id.
    pub async fn get(&self, id_game: i32) -> Option<GameHandle> {
        self.0.read().await.get(&id_game).cloned()
    }

    /// Drops a game from the store. A game has no other way to be closed:
    /// once its last handle and the transport's receiver are both dropped,
    /// its actor task exits on its own when the channel closes.
    pub async fn remove(&self, id_game: i32) {
        self.0.write().await.remove(&id_game);
    }
}

impl Default for GamesHandle {
    fn default() -> Self {
        Self::new()
    }
}
