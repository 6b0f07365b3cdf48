//! Free-slot discovery inside the daily study window.
//!
//! Walks each day of the horizon, carves the preferred window around
//! existing bookings, and emits the free intervals large enough to
//! host at least one study session.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::SchedulingOptions;
use crate::error::ValidationError;
use crate::session::Booking;

/// A free, bookable time interval within a day's preferred window.
///
/// Produced fresh on every [`SlotFinder::find_slots`] call. The
/// allocator consumes a slot by shrinking its `start_time`; slots are
/// never persisted by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Check if this slot can fit a session of given duration
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }
}

/// Finder for free time slots over a rolling horizon.
pub struct SlotFinder {
    options: SchedulingOptions,
}

impl SlotFinder {
    /// Create a finder from validated options.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the options are malformed
    /// (empty preferred window, non-positive session length, negative
    /// break, horizon shorter than one day).
    pub fn new(options: SchedulingOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Find free slots for each day of the horizon.
    ///
    /// # Arguments
    /// * `bookings` - Existing commitments; may be unsorted, and
    ///   entries outside the horizon are ignored
    /// * `horizon_start` - First day of the horizon, supplied
    ///   explicitly so results never depend on the wall clock
    ///
    /// # Returns
    /// Slots ordered by start time, each at least one session long.
    /// Slots never cross midnight; adjacent days are not merged.
    pub fn find_slots(&self, bookings: &[Booking], horizon_start: DateTime<Utc>) -> Vec<TimeSlot> {
        let mut slots = Vec::new();

        for day in 0..self.options.days_ahead {
            let Some((day_start, day_end)) = self.day_window(horizon_start, day) else {
                continue;
            };

            // Bookings that start inside this day's window, earliest first.
            // The sort is stable: bookings sharing a start time keep their
            // input order (overlapping bookings are a caller-side
            // data-quality issue the engine does not resolve).
            let mut day_bookings: Vec<&Booking> = bookings
                .iter()
                .filter(|b| b.start_time >= day_start && b.start_time <= day_end)
                .collect();
            day_bookings.sort_by_key(|b| b.start_time);

            let mut cursor = day_start;

            for booking in day_bookings {
                if (booking.start_time - cursor).num_minutes() >= self.options.session_minutes {
                    slots.push(TimeSlot::new(cursor, booking.start_time));
                }

                // Cursor is monotone: a booking nested inside an earlier
                // one must not move it backwards.
                let next = booking.end_time + Duration::minutes(self.options.break_minutes);
                if next > cursor {
                    cursor = next;
                }
            }

            if (day_end - cursor).num_minutes() >= self.options.session_minutes {
                slots.push(TimeSlot::new(cursor, day_end));
            }
        }

        slots
    }

    /// Preferred window boundaries for a day of the horizon.
    fn day_window(
        &self,
        horizon_start: DateTime<Utc>,
        day_offset: u32,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let day = horizon_start + Duration::days(i64::from(day_offset));

        let day_start = day
            .with_hour(self.options.preferred_start_hour)?
            .with_minute(0)?
            .with_second(0)?
            .with_nanosecond(0)?;

        let day_end = day
            .with_hour(self.options.preferred_end_hour)?
            .with_minute(0)?
            .with_second(0)?
            .with_nanosecond(0)?;

        Some((day_start, day_end))
    }
}

/// Convenience function to validate options and find slots in one call.
///
/// # Errors
/// Returns a [`ValidationError`] if the options are malformed.
pub fn find_free_slots(
    bookings: &[Booking],
    options: &SchedulingOptions,
    horizon_start: DateTime<Utc>,
) -> Result<Vec<TimeSlot>, ValidationError> {
    Ok(SlotFinder::new(options.clone())?.find_slots(bookings, horizon_start))
}
