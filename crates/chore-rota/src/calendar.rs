//! Calendar resolution: fixed timezone, week boundaries, rotation offsets.
//!
//! All date math is anchored to one configured timezone and one configured
//! epoch date, carried as explicit fields of [`RotaCalendar`] rather than
//! process globals. Only [`RotaCalendar::now`] touches the wall clock; every
//! other method is a pure function of its arguments, so tests run against
//! fixed instants.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

const SECONDS_PER_DAY: i64 = 86_400;

/// Default timezone for the household.
pub const DEFAULT_TZ: Tz = chrono_tz::Pacific::Auckland;

/// Default rotation epoch: Sunday 11 April 2021, local midnight.
pub const DEFAULT_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2021, 4, 11) {
    Some(d) => d,
    None => panic!("invalid epoch date"),
};

/// A resolved week: its Sunday anchor and the rotation offset of that Sunday.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Week {
    /// The Sunday ending the week.
    pub sunday: DateTime<Tz>,
    /// Whole weeks elapsed from the epoch to `sunday`.
    pub offset: i64,
}

/// Fixed-timezone calendar driving the weekly rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotaCalendar {
    /// Timezone every instant is resolved in.
    pub tz: Tz,
    /// Epoch date; offset 0 is the week whose Sunday is this date.
    pub epoch: NaiveDate,
}

impl Default for RotaCalendar {
    fn default() -> Self {
        Self {
            tz: DEFAULT_TZ,
            epoch: DEFAULT_EPOCH,
        }
    }
}

impl RotaCalendar {
    /// Calendar with an explicit timezone and epoch.
    pub fn new(tz: Tz, epoch: NaiveDate) -> Self {
        Self { tz, epoch }
    }

    /// Current time in the configured timezone.
    ///
    /// The only wall-clock read in the crate.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    /// The Sunday of the week containing `instant`.
    ///
    /// Advances by `(6 - weekday) mod 7` days with Monday=0..Sunday=6, so a
    /// Sunday maps to itself.
    pub fn week_sunday(&self, instant: DateTime<Tz>) -> DateTime<Tz> {
        let days = i64::from((6 - instant.weekday().num_days_from_monday()) % 7);
        instant + Duration::days(days)
    }

    /// Whole 7-day periods between the epoch (local midnight) and `instant`.
    ///
    /// Floor division throughout: instants before the epoch yield negative
    /// offsets, and the offset increments by exactly 1 every 7 days.
    pub fn rotation_offset(&self, instant: DateTime<Tz>) -> i64 {
        let elapsed = instant.signed_duration_since(local_midnight(self.tz, self.epoch));
        elapsed
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
            .div_euclid(7)
    }

    /// Resolve the week containing `instant`.
    ///
    /// The offset is taken of the week's *Sunday*, not of `instant` itself —
    /// that is what makes any instant in the same Monday–Sunday week resolve
    /// identically.
    pub fn week_of(&self, instant: DateTime<Tz>) -> Week {
        let sunday = self.week_sunday(instant);
        Week {
            sunday,
            offset: self.rotation_offset(sunday),
        }
    }

    /// Resolve the current week from the wall clock.
    pub fn current_week(&self) -> Week {
        self.week_of(self.now())
    }

    /// Long display form, e.g. `Sunday, 11 April 2021`. Display only — never
    /// used in rotation logic.
    pub fn format_date(&self, instant: DateTime<Tz>) -> String {
        instant.format("%A, %-d %B %Y").to_string()
    }
}

/// Local midnight of `date` in `tz`.
///
/// A DST jump can skip local midnight; the skipped case falls back to the
/// UTC reading of the same naive datetime.
pub(crate) fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
