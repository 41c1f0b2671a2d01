use std::sync::mpsc;
use std::thread::JoinHandle;

use super::api::{SearchLimits, SearchOutcome};
use super::search;
use crate::engine::session::GameSession;

/// Handle to a search running on its own thread. The search itself is
/// synchronous and always runs to its fixed depth; this wrapper only keeps
/// it off the caller's interaction thread. The spawned thread owns its own
/// session copy, so no state is shared while it runs.
#[derive(Debug)]
pub struct AsyncSearch {
    rx: mpsc::Receiver<SearchOutcome>,
    join: Option<JoinHandle<()>>,
}

impl AsyncSearch {
    pub fn try_recv(&self) -> Option<SearchOutcome> {
        self.rx.try_recv().ok()
    }

    pub fn wait(mut self) -> Option<SearchOutcome> {
        let outcome = self.rx.recv().ok();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        outcome
    }
}

pub fn spawn_search(session: GameSession, limits: SearchLimits) -> AsyncSearch {
    let (tx, rx) = mpsc::channel::<SearchOutcome>();
    let join = std::thread::spawn(move || {
        let mut session = session;
        let outcome = search::search_best_move(&mut session, limits);
        let _ = tx.send(outcome);
    });
    AsyncSearch {
        rx,
        join: Some(join),
    }
}
