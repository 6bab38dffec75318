use chrono::NaiveDate;
use textarchive_core::temporal::{has_date, has_time, strip_temporal, try_normalize_time};
use textarchive_core::{find_date, find_time, normalize_date, normalize_time, TemporalKind};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

#[test]
fn afternoon_hour_dot_canonicalizes_to_24h() {
    let raw = find_time("下午2点30分开会").expect("hour-dot notation should match");
    assert_eq!(normalize_time(raw).as_deref(), Some("14:30"));
}

#[test]
fn tomorrow_resolves_against_snapshot() {
    let raw = find_date("明天").expect("relative day should match");
    assert_eq!(normalize_date(raw, today()).as_deref(), Some("2025-01-11"));
}

#[test]
fn relative_days_cross_month_and_year_boundaries() {
    let new_year_eve = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert_eq!(normalize_date("明天", new_year_eve).as_deref(), Some("2025-01-01"));
    let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    assert_eq!(normalize_date("昨天", first).as_deref(), Some("2025-02-28"));
}

#[test]
fn full_width_colon_and_am_pm_forms_match() {
    assert_eq!(find_time("会议改到 9：15"), Some("9：15"));
    assert_eq!(normalize_time("9：15").as_deref(), Some("09:15"));
    assert_eq!(find_time("call at 7pm"), Some("7pm"));
    assert_eq!(normalize_time("7pm").as_deref(), Some("19:00"));
}

#[test]
fn full_date_outranks_month_day_and_relative_words() {
    assert_eq!(find_date("明天提醒我 2025年3月8日 交材料"), Some("2025年3月8日"));
    assert_eq!(find_date("3-8 或 2025/03/09"), Some("2025/03/09"));
    assert_eq!(
        normalize_date("2025/03/09", today()).as_deref(),
        Some("2025-03-09")
    );
}

#[test]
fn period_and_weekday_words_match_but_do_not_canonicalize() {
    for text in ["下周开会", "本月底前", "星期天去公园", "周一例会"] {
        let raw = find_date(text).expect("notation should match");
        assert_eq!(normalize_date(raw, today()), None, "{text}");
    }
}

#[test]
fn miss_reports_kind_and_raw() {
    let miss = try_normalize_time("99:99").unwrap_err();
    assert_eq!(miss.kind, TemporalKind::Time);
    assert_eq!(miss.raw, "99:99");
}

#[test]
fn presence_checks_cover_every_table_entry() {
    assert!(has_time("5 AM 起床"));
    assert!(has_time("晚上8点"));
    assert!(!has_time("no clock here"));
    assert!(has_date("星期五"));
    assert!(!has_date("plain words"));
}

#[test]
fn stripping_keeps_non_temporal_text() {
    assert_eq!(strip_temporal("2025-01-20 下午3点 客户拜访"), "客户拜访");
    assert_eq!(strip_temporal("买牛奶"), "买牛奶");
}
