use crate::domain::ports::RandomSource;
use crate::domain::turn::BatsmanMove;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Seedable RNG adapter for the computer opponent.
///
/// Wraps a `StdRng` behind a mutex so the engine can hold the source behind
/// `&self`. Seed it for reproducible games, or use entropy in production.
pub struct StdRandomSource {
    rng: Mutex<StdRng>,
}

impl StdRandomSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A poisoned RNG mutex is still a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut rng)
    }
}

impl RandomSource for StdRandomSource {
    fn draw_move(&self) -> BatsmanMove {
        let index = self.with_rng(|rng| rng.gen_range(0..BatsmanMove::ALL.len()));
        BatsmanMove::ALL[index]
    }

    fn draw_total(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.with_rng(|rng| rng.gen_range(0..bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_stay_in_range() {
        let source = StdRandomSource::from_entropy();
        for _ in 0..200 {
            let mv = source.draw_move();
            assert!((1..=6).contains(&mv.value()));
        }
    }

    #[test]
    fn test_totals_respect_bound() {
        let source = StdRandomSource::from_entropy();
        for _ in 0..200 {
            assert!(source.draw_total(13) < 13);
        }
        assert_eq!(source.draw_total(0), 0);
        assert_eq!(source.draw_total(1), 0);
    }

    #[test]
    fn test_seeded_sources_agree() {
        let a = StdRandomSource::seeded(42);
        let b = StdRandomSource::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.draw_move(), b.draw_move());
            assert_eq!(a.draw_total(13), b.draw_total(13));
        }
    }
}
