use chrono::NaiveDate;
use textarchive_core::model::record::RecordValidationError;
use textarchive_core::{ArchiveRecord, Category, ClassificationEngine};
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

#[test]
fn event_result_projects_to_schedule_record() {
    let engine = ClassificationEngine::offline();
    let text = "明天 下午3点 预约牙医";
    let record = engine.classify_heuristic_only(text, today()).into_record(text);

    let ArchiveRecord::Schedule(schedule) = &record else {
        panic!("expected schedule record, got {record:?}");
    };
    assert!(!schedule.uuid.is_nil());
    assert_eq!(schedule.date.as_deref(), Some("2025-01-11"));
    assert_eq!(schedule.time.as_deref(), Some("15:00"));
    assert_eq!(schedule.description, "预约牙医");
    assert_eq!(schedule.original_text, text);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["type"], "schedule");
    assert_eq!(json["original_text"], text);
}

#[test]
fn note_result_projects_to_memo_record_with_tag_column() {
    let engine = ClassificationEngine::offline();
    let text = "学习笔记：整理 project 的想法";
    let result = engine.classify_as(text, Category::Note, today());

    let ArchiveRecord::Memo(memo) = result.into_record(text) else {
        panic!("expected memo record");
    };
    assert_eq!(memo.content, text);
    assert_eq!(memo.tags_column().as_deref(), Some("work,study,idea"));
}

#[test]
fn explicit_ids_must_not_be_nil() {
    let engine = ClassificationEngine::offline();
    let extracted = engine.classify_as("随手记", Category::Note, today()).extracted;

    let err = ArchiveRecord::with_id(Uuid::nil(), extracted.clone(), "随手记").unwrap_err();
    assert_eq!(err, RecordValidationError::NilUuid);

    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let record = ArchiveRecord::with_id(id, extracted, "随手记").unwrap();
    assert_eq!(record.uuid(), id);
}
