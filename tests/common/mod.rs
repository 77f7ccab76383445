#![allow(dead_code)]

use handcricket::application::engine::GameEngine;
use handcricket::config::GameConfig;
use handcricket::domain::ports::{RandomSource, RandomSourceBox};
use handcricket::domain::session::PlayerId;
use handcricket::domain::turn::BatsmanMove;
use handcricket::infrastructure::in_memory::InMemorySessionStore;
use handcricket::infrastructure::local_ledger::LocalLedger;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const PLAYER: &str = "DemoBatsman1111111111111111111111";

pub fn player() -> PlayerId {
    PlayerId::parse(PLAYER).unwrap()
}

/// Scripted randomness: pops queued draws and falls back to fixed values
/// (move 5, total 0) when the script runs dry.
pub struct ScriptedRandom {
    moves: Mutex<VecDeque<u8>>,
    totals: Mutex<VecDeque<u32>>,
}

impl ScriptedRandom {
    pub fn new(moves: &[u8], totals: &[u32]) -> Self {
        Self {
            moves: Mutex::new(moves.iter().copied().collect()),
            totals: Mutex::new(totals.iter().copied().collect()),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn draw_move(&self) -> BatsmanMove {
        let value = self.moves.lock().unwrap().pop_front().unwrap_or(5);
        BatsmanMove::new(value).unwrap()
    }

    fn draw_total(&self, bound: u32) -> u32 {
        let value = self.totals.lock().unwrap().pop_front().unwrap_or(0);
        assert!(
            bound == 0 || value < bound,
            "scripted total {value} outside [0, {bound})"
        );
        value
    }
}

/// An engine wired to in-memory adapters, with handles kept so tests can
/// drive settlement and inspect state behind the engine's back.
pub struct Harness {
    pub engine: GameEngine,
    pub ledger: LocalLedger,
    pub store: InMemorySessionStore,
}

pub fn harness(ledger: LocalLedger, random: RandomSourceBox) -> Harness {
    harness_with_config(GameConfig::default(), ledger, random)
}

pub fn harness_with_config(
    config: GameConfig,
    ledger: LocalLedger,
    random: RandomSourceBox,
) -> Harness {
    let store = InMemorySessionStore::new();
    let engine = GameEngine::new(
        config,
        Box::new(store.clone()),
        Box::new(ledger.clone()),
        Box::new(ledger.clone()),
        random,
    );
    Harness {
        engine,
        ledger,
        store,
    }
}
