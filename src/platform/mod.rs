//! Platform abstraction layer: frame pacing and entropy.

use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};
use tracing::debug;

/// Sleeps for `duration`. Spin-sleeps while the window is focused for tighter pacing.
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// The game's random source: reproducible when seeded, otherwise drawn from the OS.
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => {
            debug!(seed, "Using seeded RNG");
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_os_rng(),
    }
}
