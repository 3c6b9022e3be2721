//! Business time helpers

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Today's date in the business timezone
///
/// Stay-date guards compare against this, not against UTC midnight, so a
/// late local evening does not flip the hotel into tomorrow early.
pub fn business_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}
