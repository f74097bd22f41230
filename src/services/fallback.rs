//! 兜底报告服务 - 业务能力层
//!
//! 报告字段结构的唯一来源。分析失败时返回字段齐全的默认报告，
//! 合并阶段补缺也复用这里的默认值。

use crate::models::{fields, ExamReport, FormatCategory, QuestionType, Record, ScopeCategory};
use serde_json::{json, Map, Value};

/// 构建默认报告
///
/// # 参数
/// - `character_count`: 本地统计的字母数（文本提取失败时为 0）
/// - `error_message`: 写入 `error` 字段的说明
pub fn build_default(character_count: u64, error_message: &str) -> ExamReport {
    let mut record = Record::new();
    for field in fields::REQUIRED {
        if let Some(value) = default_field(field) {
            record.insert(field.to_string(), value);
        }
    }
    record.insert(fields::TOTAL_CHARACTERS.to_string(), json!(character_count));
    record.insert(fields::ERROR.to_string(), json!(error_message));
    ExamReport::from_record(record)
}

/// 单个顶层字段的默认值，未知字段返回 `None`
pub fn default_field(field: &str) -> Option<Value> {
    let value = match field {
        fields::SCHOOL_NAME | fields::PUBLISHER | fields::GRADE | fields::EXAM_TYPE => json!(""),
        fields::TOTAL_QUESTIONS | fields::TOTAL_CHARACTERS => json!(0),
        fields::HIGHEST_DIFFICULTY_VOCAB => json!([]),
        fields::QUESTION_TYPES => Value::Object(default_question_types()),
        fields::QUESTION_FORMAT => Value::Object(default_question_format()),
        fields::QUESTION_SCOPE => Value::Object(default_question_scope()),
        _ => return None,
    };
    Some(value)
}

/// 题型 / 题目形式中单个分类的默认值
pub fn empty_count_entry() -> Value {
    json!({ "count": 0, "numbers": [] })
}

/// 出题范围中单个分类的默认值
pub fn empty_scope_entry() -> Value {
    json!({ "chapters": [], "count": 0, "numbers": [] })
}

pub fn default_question_types() -> Map<String, Value> {
    QuestionType::ALL
        .iter()
        .map(|t| (t.label().to_string(), empty_count_entry()))
        .collect()
}

pub fn default_question_format() -> Map<String, Value> {
    FormatCategory::ALL
        .iter()
        .map(|f| (f.label().to_string(), empty_count_entry()))
        .collect()
}

pub fn default_question_scope() -> Map<String, Value> {
    ScopeCategory::ALL
        .iter()
        .map(|s| (s.label().to_string(), empty_scope_entry()))
        .collect()
}
