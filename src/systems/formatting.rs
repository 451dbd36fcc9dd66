//! Aligned text rendering of profiling statistics.

use num_width::NumberWidth;
use smallvec::SmallVec;
use std::time::Duration;
use strum::EnumCount;

use crate::systems::profiling::SystemId;

/// A duration split into a whole part, a three-digit fractional part and a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DurationParts {
    whole: u64,
    fraction: u32,
    unit: &'static str,
}

impl From<Duration> for DurationParts {
    fn from(duration: Duration) -> Self {
        let (whole, fraction, unit) = if duration >= Duration::from_secs(1) {
            (duration.as_secs(), duration.subsec_millis(), "s")
        } else if duration >= Duration::from_millis(1) {
            (duration.as_millis() as u64, (duration.as_micros() % 1000) as u32, "ms")
        } else if duration >= Duration::from_micros(1) {
            (duration.as_micros() as u64, (duration.as_nanos() % 1000) as u32, "µs")
        } else {
            (duration.as_nanos() as u64, 0, "ns")
        };

        Self { whole, fraction, unit }
    }
}

/// Formats `(name, average, standard deviation)` rows into aligned `avg ± stddev` lines.
pub fn format_timing_display(
    timing_data: impl IntoIterator<Item = (String, Duration, Duration)>,
) -> SmallVec<[String; SystemId::COUNT]> {
    let rows: SmallVec<[(String, DurationParts, DurationParts); SystemId::COUNT]> = timing_data
        .into_iter()
        .map(|(name, avg, std_dev)| (name, avg.into(), std_dev.into()))
        .collect();

    let name_width = rows.iter().map(|(name, ..)| name.len()).max().unwrap_or(0);
    let avg_width = rows.iter().map(|(_, avg, _)| avg.whole.width() as usize).max().unwrap_or(0);
    let std_width = rows.iter().map(|(.., std)| std.whole.width() as usize).max().unwrap_or(0);

    rows.iter()
        .map(|(name, avg, std)| {
            format!(
                "{name:name_width$} : {:avg_width$}.{:03}{} ± {:std_width$}.{:03}{}",
                avg.whole, avg.fraction, avg.unit, std.whole, std.fraction, std.unit,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_parts_units() {
        assert_eq!(DurationParts::from(Duration::from_millis(1500)).unit, "s");
        assert_eq!(DurationParts::from(Duration::from_micros(2500)).unit, "ms");
        assert_eq!(DurationParts::from(Duration::from_nanos(1500)).unit, "µs");
        assert_eq!(DurationParts::from(Duration::from_nanos(15)).unit, "ns");
    }

    #[test]
    fn test_duration_parts_values() {
        let parts = DurationParts::from(Duration::from_micros(2_345));
        assert_eq!((parts.whole, parts.fraction), (2, 345));
    }
}
