use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Asia::Taipei;
use chrono_tz::Tz;

/// Today's calendar date in the zone the course schedule lives in,
/// so a run on any host picks the same lesson for the same civil day.
#[derive(Debug, Clone)]
pub(crate) struct CivilDay {
    pub(crate) date_key: String,
    pub(crate) ordinal_day: u32,
}

pub(crate) fn taipei_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&Taipei)
}

pub(crate) fn taipei_today() -> CivilDay {
    let now = taipei_now();
    CivilDay {
        date_key: now.format("%Y-%m-%d").to_string(),
        ordinal_day: now.ordinal(),
    }
}

/// Maps the 1-based ordinal day of the year to an index into the lesson
/// pool. Advances one position per day and wraps every `sequence_length`
/// days, not once per year.
pub(crate) fn select_index(sequence_length: usize, calendar_day_of_year: u32) -> Result<usize> {
    if sequence_length == 0 {
        bail!("no lessons available for selection");
    }
    Ok(calendar_day_of_year.saturating_sub(1) as usize % sequence_length)
}
