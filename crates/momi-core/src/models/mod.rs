pub mod book;
pub mod library;
pub mod payload;
pub mod recipe;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to the millisecond precision timestamps are stored with.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
