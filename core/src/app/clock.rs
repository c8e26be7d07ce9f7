//! Wall clock in the user's configured offset

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Format of `current_date_time` in the Captain's Log
pub const STATE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

#[derive(Debug, Clone, Copy)]
pub struct Clock {
    offset: FixedOffset,
}

impl Clock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// `2025-05-16`
    pub fn date_string(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }

    /// `2025-05-16 09:30:00 +01:00`
    pub fn timestamp_string(&self) -> String {
        self.now().format(STATE_TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    #[test]
    fn timestamp_carries_offset() {
        let clock = Clock::new(FixedOffset::east_opt(2 * 3600).unwrap());
        let stamp = clock.timestamp_string();
        assert!(stamp.ends_with(" +02:00"), "{}", stamp);
        assert!(DateTime::<FixedOffset>::parse_from_str(&stamp, STATE_TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn date_string_is_iso_day() {
        let clock = Clock::new(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(clock.date_string(), clock.today().to_string());
        assert_eq!(clock.date_string().len(), 10);
    }
}
