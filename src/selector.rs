//! Hourly forecast slot selection
//!
//! Turns a 24-hour-plus hourly forecast into the compact six-slot strip
//! shown in the conditions view, with the hottest and coldest readings
//! marked. Two selection behaviors shipped over the product's history and
//! both remain selectable: one favors the most extreme readings, the
//! other favors typical waking hours.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::data::HourlySlot;

/// Hours ahead of now targeted by the first windowed slot
const FIRST_SLOT_OFFSET_HOURS: i64 = 2;

/// Hours stepped between subsequent windowed slots
const SLOT_STEP_HOURS: i64 = 3;

/// Local hour at which the windowed strategy starts skipping (inclusive)
const NIGHT_START_HOUR: u32 = 21;

/// Local hour the windowed strategy skips forward to
const MORNING_HOUR: u32 = 6;

/// Number of slots produced by the windowed strategy
const WINDOWED_SLOT_COUNT: usize = 6;

/// Number of slots ranked into each temperature extreme
const EXTREME_COUNT: usize = 3;

/// How hourly slots are chosen for the compact display strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStrategy {
    /// Show the three hottest and three coldest readings, in time order
    Extremity,
    /// Show six slots spread over waking hours, nearest to fixed targets
    Windowed,
}

impl SlotStrategy {
    /// Returns a slice containing all strategy variants.
    pub fn all() -> &'static [SlotStrategy] {
        &[SlotStrategy::Extremity, SlotStrategy::Windowed]
    }

    /// Returns a human-readable display label for the strategy.
    pub fn label(&self) -> &'static str {
        match self {
            SlotStrategy::Extremity => "Extremity",
            SlotStrategy::Windowed => "Windowed",
        }
    }

    /// Parses user input into a strategy.
    ///
    /// Matching is case-insensitive and supports aliases:
    /// - "extremity" | "extremes" | "extreme" -> Extremity
    /// - "windowed" | "window" -> Windowed
    ///
    /// Returns `None` if the input doesn't match any strategy.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<SlotStrategy> {
        match s.to_lowercase().trim() {
            "extremity" | "extremes" | "extreme" => Some(SlotStrategy::Extremity),
            "windowed" | "window" => Some(SlotStrategy::Windowed),
            _ => None,
        }
    }

    /// Returns the other strategy, for runtime toggling.
    pub fn toggled(&self) -> SlotStrategy {
        match self {
            SlotStrategy::Extremity => SlotStrategy::Windowed,
            SlotStrategy::Windowed => SlotStrategy::Extremity,
        }
    }
}

/// Temperature extremity marker attached to a selected slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempMarker {
    /// Among the hottest readings of the selection
    Hot,
    /// Among the coldest readings of the selection
    Cold,
}

impl TempMarker {
    /// Display symbol for the marker.
    pub fn symbol(&self) -> &'static str {
        match self {
            TempMarker::Hot => "🔥",
            TempMarker::Cold => "🧊",
        }
    }
}

/// A selected slot with its optional extremity marker
#[derive(Debug, Clone)]
pub struct MarkedSlot {
    /// The selected forecast slot
    pub slot: HourlySlot,
    /// Hot/Cold marker, when the slot ranks among the extremes
    pub marker: Option<TempMarker>,
}

/// Selects the display slots from an hourly forecast.
///
/// Empty input yields an empty selection from either strategy; the UI
/// treats that as "nothing to show", not an error. The input is expected
/// to be chronologically ascending and is re-sorted when it is not.
pub fn select_slots(
    slots: &[HourlySlot],
    now: NaiveDateTime,
    strategy: SlotStrategy,
) -> Vec<MarkedSlot> {
    if slots.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<HourlySlot> = slots.to_vec();
    if !ordered.windows(2).all(|pair| pair[0].time <= pair[1].time) {
        ordered.sort_by_key(|slot| slot.time);
    }

    match strategy {
        SlotStrategy::Extremity => select_extremity(&ordered),
        SlotStrategy::Windowed => select_windowed(&ordered, now),
    }
}

/// Extremity strategy: union of the three hottest and three coldest slots,
/// deduplicated by slot time and returned in chronological order. A slot
/// that ranks in both sets is marked Hot.
fn select_extremity(ordered: &[HourlySlot]) -> Vec<MarkedSlot> {
    let refs: Vec<&HourlySlot> = ordered.iter().collect();
    let (hot_times, cold_times) = extreme_time_sets(&refs);

    let mut seen = HashSet::new();
    let mut selected = Vec::new();
    for slot in ordered {
        let is_hot = hot_times.contains(&slot.time);
        let is_cold = cold_times.contains(&slot.time);
        if (is_hot || is_cold) && seen.insert(slot.time) {
            let marker = if is_hot {
                Some(TempMarker::Hot)
            } else {
                Some(TempMarker::Cold)
            };
            selected.push(MarkedSlot {
                slot: slot.clone(),
                marker,
            });
        }
    }

    selected
}

/// Windowed strategy: six nearest-neighbor picks against target times two
/// hours out and then every three hours, with late-night targets advanced
/// to the next 06:00. The first target is exempt from the night skip.
/// Short inputs can select the same slot for several targets; the
/// duplicates are preserved.
fn select_windowed(ordered: &[HourlySlot], now: NaiveDateTime) -> Vec<MarkedSlot> {
    let mut target = now + Duration::hours(FIRST_SLOT_OFFSET_HOURS);
    let mut picked: Vec<&HourlySlot> = vec![nearest_slot(ordered, target)];

    while picked.len() < WINDOWED_SLOT_COUNT {
        target += Duration::hours(SLOT_STEP_HOURS);
        target = skip_night(target);
        picked.push(nearest_slot(ordered, target));
    }

    let (hot_times, cold_times) = extreme_time_sets(&picked);

    picked
        .into_iter()
        .map(|slot| {
            let marker = if hot_times.contains(&slot.time) {
                Some(TempMarker::Hot)
            } else if cold_times.contains(&slot.time) {
                Some(TempMarker::Cold)
            } else {
                None
            };
            MarkedSlot {
                slot: slot.clone(),
                marker,
            }
        })
        .collect()
}

/// Advances a target landing in the late-night band (21:00 through 05:59)
/// to the next 06:00.
fn skip_night(target: NaiveDateTime) -> NaiveDateTime {
    let hour = target.hour();
    let morning = |date: chrono::NaiveDate| {
        date.and_hms_opt(MORNING_HOUR, 0, 0)
            .expect("06:00 is a valid time")
    };

    if hour >= NIGHT_START_HOUR {
        morning(target.date() + Duration::days(1))
    } else if hour < MORNING_HOUR {
        morning(target.date())
    } else {
        target
    }
}

/// Finds the slot closest in time to `target`; ties resolve to the
/// earliest slot because the scan keeps the first strictly-better match.
fn nearest_slot<'a>(ordered: &'a [HourlySlot], target: NaiveDateTime) -> &'a HourlySlot {
    let mut best = &ordered[0];
    let mut best_diff = abs_delta(best.time, target);

    for slot in &ordered[1..] {
        let diff = abs_delta(slot.time, target);
        if diff < best_diff {
            best = slot;
            best_diff = diff;
        }
    }

    best
}

/// Absolute time difference between two wall times
fn abs_delta(a: NaiveDateTime, b: NaiveDateTime) -> Duration {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// Ranks slots by temperature and returns the times of the three hottest
/// and three coldest. Ties within either ranking resolve to the earliest
/// slot time, which keeps the selection deterministic.
fn extreme_time_sets(slots: &[&HourlySlot]) -> (HashSet<NaiveDateTime>, HashSet<NaiveDateTime>) {
    let mut by_heat: Vec<&HourlySlot> = slots.to_vec();
    by_heat.sort_by(|a, b| {
        b.temperature
            .partial_cmp(&a.temperature)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.time.cmp(&b.time))
    });
    let hot_times = by_heat
        .iter()
        .take(EXTREME_COUNT)
        .map(|slot| slot.time)
        .collect();

    let mut by_cold: Vec<&HourlySlot> = slots.to_vec();
    by_cold.sort_by(|a, b| {
        a.temperature
            .partial_cmp(&b.temperature)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.time.cmp(&b.time))
    });
    let cold_times = by_cold
        .iter()
        .take(EXTREME_COUNT)
        .map(|slot| slot.time)
        .collect();

    (hot_times, cold_times)
}
