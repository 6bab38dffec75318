//! Note field extraction.

use crate::model::classification::NoteFields;

/// Default summary length, in characters.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 100;

const SUMMARY_ELLIPSIS: &str = "...";

/// Keyword groups and the tag each contributes, in declaration order.
pub const TAG_GROUPS: &[(&str, &[&str])] = &[
    ("work", &["工作", "work", "项目", "project"]),
    ("study", &["学习", "study", "课程", "course"]),
    ("life", &["生活", "life", "日常"]),
    ("idea", &["想法", "idea", "思考"]),
];

/// Builds note fields: verbatim content, truncated summary, keyword tags.
pub fn extract_note(text: &str, summary_max_chars: usize) -> NoteFields {
    NoteFields {
        content: text.to_string(),
        summary: summarize(text, summary_max_chars),
        tags: extract_tags(text),
    }
}

/// Returns `text` unchanged when it fits, otherwise its first
/// `max_chars` characters followed by `...`.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{SUMMARY_ELLIPSIS}", &text[..cut]),
    }
}

/// Returns tags of every keyword group present in `text`.
pub fn extract_tags(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tags: Vec<String> = Vec::new();
    for (tag, keywords) in TAG_GROUPS {
        let present = keywords.iter().any(|keyword| lowered.contains(keyword));
        if present && !tags.iter().any(|existing| existing == tag) {
            tags.push((*tag).to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::{extract_tags, summarize};

    #[test]
    fn summarize_counts_characters_not_bytes() {
        let text = "好".repeat(101);
        let summary = summarize(&text, 100);
        assert_eq!(summary.chars().count(), 103);
        assert!(summary.starts_with(&"好".repeat(100)));
        assert!(summary.ends_with("..."));
        assert_eq!(summarize("短文本", 100), "短文本");
    }

    #[test]
    fn tags_follow_group_order() {
        assert_eq!(
            extract_tags("Idea for the PROJECT: 学习 Rust"),
            vec!["work".to_string(), "study".to_string(), "idea".to_string()]
        );
        assert!(extract_tags("nothing here").is_empty());
    }
}
