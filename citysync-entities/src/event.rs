use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

use crate::{category::*, contact::*, id::*, url::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id            : Id,
    pub title         : String,
    pub description   : Option<String>,
    /// Free text as entered by the organizer, e.g. "Zelný trh".
    pub location      : String,
    // The backend stores the date as plain text!
    pub date          : String,
    pub admission     : Option<String>,
    pub external_link : Option<Url>,
    pub category      : Option<Category>,
    pub image_url     : Option<Url>,
    pub contact       : Option<ContactInfo>,
    pub created_at    : Option<OffsetDateTime>,
}

impl Event {
    /// The start of the event, if the date text could be parsed.
    pub fn start(&self) -> Option<OffsetDateTime> {
        parse_event_date(&self.date)
    }
}

/// Parses the free-text event date.
///
/// Accepts RFC 3339 time stamps as well as plain dates and
/// date-times without an offset, which are interpreted as UTC.
pub fn parse_event_date(date: &str) -> Option<OffsetDateTime> {
    let date = date.trim();
    if let Ok(ts) = OffsetDateTime::parse(date, &Rfc3339) {
        return Some(ts);
    }
    let date_time = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(ts) = PrimitiveDateTime::parse(date, date_time) {
        return Some(ts.assume_utc());
    }
    let date_time_without_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    if let Ok(ts) = PrimitiveDateTime::parse(date, date_time_without_seconds) {
        return Some(ts.assume_utc());
    }
    Date::parse(date, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}
