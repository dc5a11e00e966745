//! UTC timestamp conversion for the wire boundary.
//!
//! The GoToWebinar API expresses every time-range parameter and timestamp
//! in a fixed UTC format, `YYYY-MM-DDTHH:mm:ssZ`. These helpers convert
//! between that format and [`chrono`] values; they hold no state.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// The fixed UTC wire format used by the API.
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats a datetime (in any timezone) as a UTC wire timestamp.
pub fn date_to_utc<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).format(UTC_FORMAT).to_string()
}

/// Parses a UTC wire timestamp back into a [`DateTime<Utc>`].
pub fn utc_to_date(utc_time: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(utc_time, UTC_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            Error::invalid_response(format!("invalid UTC timestamp {:?}", utc_time)).with_source(e)
        })
}
