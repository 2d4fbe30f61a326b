//! The set of distinct calendar days on which a match happened.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Weekday};
use std::collections::BTreeMap;

/// One matched day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_working_day: bool,
}

impl CalendarDay {
    /// Classifies a date; Saturdays and Sundays are not working days.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_working_day: is_working_day(date),
        }
    }

    /// `YYYY-MM-DD`
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// True unless the date falls on a weekend.
#[inline]
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Distinct calendar days, each classified as working day or weekend.
///
/// Timestamps are truncated to a date in the set's time zone (the process's local
/// zone by default). Inserting is idempotent, so the final contents do not depend
/// on the order files or records were processed in.
#[derive(Debug, Clone)]
pub struct DaySet<Tz: TimeZone = Local> {
    tz: Tz,
    days: BTreeMap<NaiveDate, bool>,
}

impl DaySet<Local> {
    /// An empty set using the process's local time zone.
    pub fn new() -> Self {
        Self::with_timezone(Local)
    }
}

impl Default for DaySet<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> DaySet<Tz> {
    /// An empty set that truncates timestamps in `tz`.
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            tz,
            days: BTreeMap::new(),
        }
    }

    /// The zone used to derive calendar dates.
    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Records the calendar day of `instant`. Returns `true` if the day was new.
    pub fn insert<T: TimeZone>(&mut self, instant: &DateTime<T>) -> bool {
        self.insert_date(instant.with_timezone(&self.tz).date_naive())
    }

    /// Records a calendar day. Returns `true` if the day was new.
    pub fn insert_date(&mut self, date: NaiveDate) -> bool {
        self.days.insert(date, is_working_day(date)).is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of distinct days that are working days.
    pub fn working_day_count(&self) -> usize {
        self.days.values().filter(|working| **working).count()
    }

    /// Number of distinct days that fall on a weekend.
    pub fn weekend_day_count(&self) -> usize {
        self.len() - self.working_day_count()
    }

    /// Days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        self.days.iter().map(|(date, working)| CalendarDay {
            date: *date,
            is_working_day: *working,
        })
    }

    /// `YYYY-MM-DD` strings in ascending order.
    pub fn to_sorted_list(&self) -> Vec<String> {
        self.iter().map(|day| day.iso_date()).collect()
    }

    /// Adds every day of `other`; the result does not depend on merge order.
    pub fn merge<T: TimeZone>(&mut self, other: &DaySet<T>) {
        for day in other.iter() {
            self.insert_date(day.date);
        }
    }
}
