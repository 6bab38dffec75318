//! Event field extraction.

use crate::model::classification::EventFields;
use crate::temporal::{find_date, find_time, normalize_date, normalize_time, strip_temporal};
use chrono::NaiveDate;

/// Extracts date, time and description from event-like text.
///
/// # Contract
/// - `date`/`time` are set only when the matched notation canonicalizes.
/// - `description` is the text with every notation removed, or the original
///   text when nothing else remains.
pub fn extract_event(text: &str, today: NaiveDate) -> EventFields {
    let time = find_time(text).and_then(normalize_time);
    let date = find_date(text).and_then(|raw| normalize_date(raw, today));

    let stripped = strip_temporal(text);
    let description = if stripped.is_empty() {
        text.to_string()
    } else {
        stripped
    };

    EventFields::new(date, time, description)
}

#[cfg(test)]
mod tests {
    use super::extract_event;
    use chrono::NaiveDate;

    #[test]
    fn weekday_only_event_has_no_time_info() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let fields = extract_event("周三 复盘会", today);
        assert_eq!(fields.date(), None);
        assert!(!fields.has_time_info());
        assert_eq!(fields.description(), "复盘会");
    }
}
