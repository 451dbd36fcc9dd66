//! Per-system timing collected across a sliding window of simulation ticks.

use bevy_ecs::system::IntoSystem;
use bevy_ecs::world::World;
use bevy_ecs::{resource::Resource, system::System};
use circular_buffer::CircularBuffer;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use thousands::Separable;

use crate::systems::formatting::format_timing_display;

/// The number of durations to keep in the circular buffer.
const TIMING_WINDOW_SIZE: usize = 30;

/// Any single system slower than this on the latest tick is always reported as slow.
const SLOW_SYSTEM_THRESHOLD: Duration = Duration::from_millis(2);

/// A timing buffer that tracks durations and pads skipped ticks with zeroes.
#[derive(Debug, Default)]
pub struct TimingBuffer {
    buffer: CircularBuffer<TIMING_WINDOW_SIZE, Duration>,
    /// The last tick when this buffer was updated
    last_tick: u64,
}

impl TimingBuffer {
    fn pad_to(&mut self, current_tick: u64) {
        if current_tick > self.last_tick + 1 {
            for _ in 0..(current_tick - self.last_tick - 1).min(TIMING_WINDOW_SIZE as u64) {
                self.buffer.push_back(Duration::ZERO);
            }
        }
    }

    /// Adds a timing duration for the current tick. Timings reported for an older tick are dropped.
    pub fn add_timing(&mut self, duration: Duration, current_tick: u64) {
        if current_tick < self.last_tick {
            return;
        }

        self.pad_to(current_tick);
        self.buffer.push_back(duration);
        self.last_tick = current_tick;
    }

    /// Gets the most recent timing from the buffer.
    pub fn most_recent(&self) -> Duration {
        self.buffer.back().copied().unwrap_or(Duration::ZERO)
    }

    /// Mean and sample standard deviation over the window (Welford's algorithm).
    pub fn stats(&mut self, current_tick: u64) -> (Duration, Duration) {
        if current_tick > self.last_tick {
            self.pad_to(current_tick);
            self.last_tick = current_tick - 1;
        }

        let mut count = 0u32;
        let mut mean = 0.0f64;
        let mut m2 = 0.0f64;

        for duration in self.buffer.iter() {
            let value = duration.as_secs_f64();
            count += 1;
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }

        match count {
            0 => (Duration::ZERO, Duration::ZERO),
            1 => (Duration::from_secs_f64(mean), Duration::ZERO),
            n => (
                Duration::from_secs_f64(mean),
                Duration::from_secs_f64((m2 / (n - 1) as f64).sqrt()),
            ),
        }
    }
}

/// A resource that tracks the current simulation tick.
#[derive(Resource, Debug, Default)]
pub struct Timing {
    current_tick: AtomicU64,
}

impl Timing {
    pub fn current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Relaxed)
    }

    /// Increments the tick counter and returns the new value
    pub fn increment_tick(&self) -> u64 {
        self.current_tick.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(EnumCount, EnumIter, IntoStaticStr, Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[strum(serialize_all = "snake_case")]
pub enum SystemId {
    Total,
    PlayerTurn,
    PlayerMovement,
    Ghost,
    Item,
    Round,
}

impl Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(<&'static str>::from(self))
    }
}

#[derive(Resource, Debug)]
pub struct SystemTimings {
    /// Statically sized map of system names to timing buffers.
    pub timings: micromap::Map<SystemId, Mutex<TimingBuffer>, { SystemId::COUNT }>,
}

impl Default for SystemTimings {
    fn default() -> Self {
        let mut timings = micromap::Map::new();
        for id in SystemId::iter() {
            timings.insert(id, Mutex::new(TimingBuffer::default()));
        }

        Self { timings }
    }
}

impl SystemTimings {
    pub fn add_timing(&self, id: SystemId, duration: Duration, current_tick: u64) {
        if let Some(buffer) = self.timings.get(&id) {
            buffer.lock().add_timing(duration, current_tick);
        }
    }

    pub fn stats(&self, current_tick: u64) -> micromap::Map<SystemId, (Duration, Duration), { SystemId::COUNT }> {
        let mut stats = micromap::Map::new();
        for (id, buffer) in self.timings.iter() {
            stats.insert(*id, buffer.lock().stats(current_tick));
        }
        stats
    }

    /// Aligned `avg ± stddev` lines: the tick rate first, then systems from slowest to fastest.
    pub fn format_timing_display(&self, current_tick: u64) -> SmallVec<[String; SystemId::COUNT]> {
        let stats = self.stats(current_tick);
        let (total_avg, total_std) = stats.get(&SystemId::Total).copied().unwrap_or_default();

        let tick_rate = match total_avg.as_secs_f64() {
            secs if secs <= 0.0 => "- TPS".to_string(),
            secs => format!("{} TPS", ((1.0 / secs) as u64).separate_with_commas()),
        };

        let mut systems: Vec<_> = stats.iter().filter(|(id, _)| **id != SystemId::Total).collect();
        systems.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));

        format_timing_display(
            std::iter::once((tick_rate, total_avg, total_std))
                .chain(systems.into_iter().map(|(id, (avg, std))| (id.to_string(), *avg, *std))),
        )
    }

    /// Systems most likely responsible for a slow tick.
    ///
    /// Anything over the slow-system threshold on the latest tick is reported; failing that,
    /// the slowest systems until they cover 30% of the tick, at most five.
    pub fn slowest_systems(&self) -> SmallVec<[(SystemId, Duration); 5]> {
        let mut recent: SmallVec<[(SystemId, Duration); { SystemId::COUNT }]> = self
            .timings
            .iter()
            .filter(|(id, _)| **id != SystemId::Total)
            .map(|(id, buffer)| (*id, buffer.lock().most_recent()))
            .collect();
        recent.sort_by(|a, b| b.1.cmp(&a.1));

        let over_threshold: SmallVec<[(SystemId, Duration); 5]> = recent
            .iter()
            .filter(|(_, duration)| *duration >= SLOW_SYSTEM_THRESHOLD)
            .take(5)
            .copied()
            .collect();
        if !over_threshold.is_empty() {
            return over_threshold;
        }

        let total: Duration = recent.iter().map(|(_, duration)| *duration).sum();
        let target = total.as_secs_f64() * 0.3;
        let mut covered = 0.0;
        let mut result = SmallVec::new();
        for (id, duration) in recent.iter().take(5) {
            result.push((*id, *duration));
            covered += duration.as_secs_f64();
            if covered >= target {
                break;
            }
        }
        result
    }
}

/// Wraps a system so each run is timed under `id`.
pub fn profile<S, M>(id: SystemId, system: S) -> impl FnMut(&mut World)
where
    S: IntoSystem<(), (), M> + 'static,
{
    let mut system: S::System = IntoSystem::into_system(system);
    let mut is_initialized = false;
    move |world: &mut World| {
        if !is_initialized {
            system.initialize(world);
            is_initialized = true;
        }

        let start = Instant::now();
        system.run((), world);
        let duration = start.elapsed();

        if let (Some(timings), Some(timing)) = (world.get_resource::<SystemTimings>(), world.get_resource::<Timing>()) {
            timings.add_timing(id, duration, timing.current_tick());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_single_sample() {
        let mut buffer = TimingBuffer::default();
        buffer.add_timing(Duration::from_millis(4), 1);
        let (avg, std_dev) = buffer.stats(1);
        assert!(avg.abs_diff(Duration::from_millis(4)) < Duration::from_micros(1));
        assert_eq!(std_dev, Duration::ZERO);
    }

    #[test]
    fn test_skipped_ticks_pad_with_zero() {
        let mut buffer = TimingBuffer::default();
        buffer.add_timing(Duration::from_millis(4), 1);
        buffer.add_timing(Duration::from_millis(4), 3);
        let (avg, _) = buffer.stats(3);
        let expected = Duration::from_secs_f64(0.008 / 3.0);
        assert!(avg.abs_diff(expected) < Duration::from_micros(1));
    }

    #[test]
    fn test_old_tick_dropped() {
        let mut buffer = TimingBuffer::default();
        buffer.add_timing(Duration::from_millis(4), 5);
        buffer.add_timing(Duration::from_millis(9), 2);
        assert_eq!(buffer.most_recent(), Duration::from_millis(4));
    }

    #[test]
    fn test_system_id_display() {
        assert_eq!(SystemId::PlayerMovement.to_string(), "player_movement");
    }
}
