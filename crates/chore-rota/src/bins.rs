//! Fortnightly bin-colour alternation.
//!
//! Green goes out every week; yellow and red alternate. The alternation runs
//! on its own epoch, independent of the chore rotation offset: on Wednesday
//! 15 February 2023 the bins were green and yellow.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::calendar::{DEFAULT_TZ, local_midnight};

const SECONDS_PER_DAY: i64 = 86_400;

/// Default bins epoch: Wednesday 15 February 2023 (green + yellow week).
pub const DEFAULT_BINS_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2023, 2, 15) {
    Some(d) => d,
    None => panic!("invalid bins epoch date"),
};

/// Wheelie-bin colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinColour {
    /// Organics — collected every week.
    Green,
    /// Recycling.
    Yellow,
    /// Landfill.
    Red,
}

impl BinColour {
    /// Lowercase colour name, as used in messages and ntfy tags.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for BinColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two-week bin alternation schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinsSchedule {
    /// Timezone the epoch midnight is anchored to.
    pub tz: Tz,
    /// First known green + yellow collection date.
    pub epoch: NaiveDate,
}

impl Default for BinsSchedule {
    fn default() -> Self {
        Self {
            tz: DEFAULT_TZ,
            epoch: DEFAULT_BINS_EPOCH,
        }
    }
}

impl BinsSchedule {
    /// The pair of bins going out in the week anchored by `sunday`.
    ///
    /// Week parity is counted in whole 7-day periods from the epoch, floor
    /// division, so pre-epoch weeks alternate correctly too.
    pub fn colours(&self, sunday: DateTime<Tz>) -> (BinColour, BinColour) {
        let elapsed = sunday.signed_duration_since(local_midnight(self.tz, self.epoch));
        let week_num = elapsed
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
            .div_euclid(7);
        let second = if week_num.rem_euclid(2) == 1 {
            BinColour::Red
        } else {
            BinColour::Yellow
        };
        (BinColour::Green, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sunday(y: i32, m: u32, d: u32) -> DateTime<Tz> {
        DEFAULT_TZ.with_ymd_and_hms(y, m, d, 0, 0, 0).single().unwrap()
    }

    #[test]
    fn epoch_week_is_yellow() {
        // The Sunday ending the epoch week (Wed 15 Feb 2023) is 19 Feb.
        assert_eq!(
            BinsSchedule::default().colours(sunday(2023, 2, 19)),
            (BinColour::Green, BinColour::Yellow)
        );
    }

    #[test]
    fn following_week_is_red() {
        assert_eq!(
            BinsSchedule::default().colours(sunday(2023, 2, 26)),
            (BinColour::Green, BinColour::Red)
        );
    }

    #[test]
    fn alternates_every_week() {
        let schedule = BinsSchedule::default();
        let mut day = sunday(2023, 2, 19);
        let mut last = schedule.colours(day).1;
        for _ in 0..8 {
            day += Duration::days(7);
            let next = schedule.colours(day).1;
            assert_ne!(next, last);
            last = next;
        }
    }

    #[test]
    fn green_always_goes_out() {
        let schedule = BinsSchedule::default();
        for weeks in 0..6 {
            let day = sunday(2023, 2, 19) + Duration::days(7 * weeks);
            assert_eq!(schedule.colours(day).0, BinColour::Green);
        }
    }

    #[test]
    fn pre_epoch_weeks_alternate() {
        let schedule = BinsSchedule::default();
        // One week before the epoch week.
        assert_eq!(
            schedule.colours(sunday(2023, 2, 12)).1,
            BinColour::Red
        );
    }
}
