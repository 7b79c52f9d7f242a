//! Business-calendar helpers.
//!
//! The service runs on a fixed business timezone regardless of where the
//! host clock is set. All calendar decisions (which day is "today", its ISO
//! weekday and week number) are made on the local date in that zone.

use anyhow::Context;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use time::{Date, Month};

/// ISO weekday number of Sunday.
pub const SUNDAY: u8 = 7;

/// One calendar day as the scheduler sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDay {
    pub date: Date,
    /// 1 = Monday .. 7 = Sunday
    pub iso_weekday: u8,
    pub iso_week: u8,
}

impl ServiceDay {
    pub fn from_date(date: Date) -> Self {
        Self {
            date,
            iso_weekday: date.weekday().number_from_monday(),
            iso_week: date.iso_week(),
        }
    }

    pub fn is_sunday(&self) -> bool {
        self.iso_weekday == SUNDAY
    }

    /// Menu rotation week: even ISO weeks serve week 2, odd weeks serve week 1.
    pub fn menu_week(&self) -> u8 {
        menu_week(self.iso_week)
    }
}

pub fn menu_week(iso_week: u8) -> u8 {
    if iso_week % 2 == 0 {
        2
    } else {
        1
    }
}

/// Local calendar date of `instant` in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> anyhow::Result<Date> {
    let local = instant.with_timezone(&tz).date_naive();
    let month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .context("month out of range")?;
    Date::from_calendar_date(local.year(), month, local.day() as u8)
        .with_context(|| format!("invalid local date {local}"))
}

pub fn today(tz: Tz) -> anyhow::Result<ServiceDay> {
    Ok(ServiceDay::from_date(local_date(Utc::now(), tz)?))
}

/// Same day next month, clamped to the last day of shorter months.
pub fn add_one_month(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        m => (date.year(), m.next()),
    };
    let last = month.length(year);
    let day = date.day().min(last);
    // `day` is within `1..=last`, so construction cannot fail.
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}
