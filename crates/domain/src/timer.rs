use chrono::{DateTime, Utc};

/// Stopwatch measuring the duration of a workout.
///
/// The current time is passed into every operation, so the timer never reads the clock itself.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutTimer {
    started: Option<DateTime<Utc>>,
    accumulated_seconds: i64,
}

impl WorkoutTimer {
    #[must_use]
    pub fn new(initial_duration_minutes: u32) -> Self {
        Self {
            started: None,
            accumulated_seconds: i64::from(initial_duration_minutes) * 60,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.started.is_some() {
            self.accumulated_seconds = self.elapsed_seconds(now);
            self.started = None;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.accumulated_seconds
            + self
                .started
                .map_or(0, |started| (now - started).num_seconds().max(0))
    }

    /// Elapsed whole minutes, as stored in the duration of a workout.
    #[must_use]
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u32 {
        u32::try_from(self.elapsed_seconds(now) / 60).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn display(&self, now: DateTime<Utc>) -> String {
        format_duration(self.elapsed_seconds(now))
    }
}

/// Format seconds as `MM:SS`, or as `HH:MM:SS` from one hour on.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
