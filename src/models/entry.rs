//! Journal entry model

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntryId;

/// A free-text reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            content: content.into(),
            created_at,
        }
    }

    /// Local calendar day the entry was written on
    pub fn day(&self) -> NaiveDate {
        self.day_in(&Local)
    }

    /// Calendar day the entry was written on as seen from `tz`
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }

    /// Case-insensitive substring match on the content
    pub fn matches(&self, query: &str) -> bool {
        self.content
            .to_lowercase()
            .contains(&query.trim().to_lowercase())
    }

    /// Human label for the entry's day relative to `today`
    pub fn relative_day_label(&self, today: NaiveDate) -> String {
        let day = self.day();
        match (today - day).num_days() {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            _ => day.format("%-d %b %Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    /// A local wall-clock time stored the way the clock stores it
    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        local(y, m, d, 9, 30)
    }

    #[test]
    fn test_matches_case_insensitive() {
        let entry = JournalEntry::new("Practiced Premeditatio Malorum", at(2025, 1, 5));
        assert!(entry.matches("premeditatio"));
        assert!(entry.matches("  MALORUM "));
        assert!(!entry.matches("amor fati"));
    }

    #[test]
    fn test_relative_day_label() {
        let entry = JournalEntry::new("note", at(2025, 1, 5));
        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();

        assert_eq!(entry.relative_day_label(day(5)), "Today");
        assert_eq!(entry.relative_day_label(day(6)), "Yesterday");
        assert_eq!(entry.relative_day_label(day(20)), "5 Jan 2025");
    }

    #[test]
    fn test_day_follows_the_writer_timezone() {
        // 02:00 on 6 June in India is still 5 June in UTC
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let written = ist.with_ymd_and_hms(2025, 6, 6, 2, 0, 0).unwrap();
        let entry = JournalEntry::new("late night", written.with_timezone(&Utc));

        assert_eq!(entry.day_in(&ist), NaiveDate::from_ymd_opt(2025, 6, 6).unwrap());
        assert_eq!(entry.day_in(&Utc), NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());
    }

    #[test]
    fn test_entry_just_after_local_midnight_is_today() {
        let entry = JournalEntry::new("still awake", local(2025, 6, 6, 0, 5));
        let today = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();

        assert_eq!(entry.day(), today);
        assert_eq!(entry.relative_day_label(today), "Today");
    }
}
