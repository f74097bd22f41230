//! 分析报告
//!
//! 报告以 JSON 对象保存，字段集合见 [`fields`]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 单个分析配置解析出的结构化记录
pub type Record = Map<String, Value>;

/// 报告字段名
pub mod fields {
    pub const SCHOOL_NAME: &str = "school_name";
    pub const PUBLISHER: &str = "publisher";
    pub const GRADE: &str = "grade";
    pub const EXAM_TYPE: &str = "exam_type";
    pub const TOTAL_QUESTIONS: &str = "total_questions";
    pub const QUESTION_TYPES: &str = "question_types";
    pub const QUESTION_FORMAT: &str = "question_format";
    pub const QUESTION_SCOPE: &str = "question_scope";
    pub const TOTAL_CHARACTERS: &str = "total_characters";
    pub const HIGHEST_DIFFICULTY_VOCAB: &str = "highest_difficulty_vocab";
    pub const ERROR: &str = "error";

    /// 除 `error` 之外的全部必填字段
    pub const REQUIRED: [&str; 10] = [
        SCHOOL_NAME,
        PUBLISHER,
        GRADE,
        EXAM_TYPE,
        TOTAL_QUESTIONS,
        QUESTION_TYPES,
        QUESTION_FORMAT,
        QUESTION_SCOPE,
        TOTAL_CHARACTERS,
        HIGHEST_DIFFICULTY_VOCAB,
    ];
}

/// 最终报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamReport(Record);

impl ExamReport {
    pub fn from_record(record: Record) -> Self {
        Self(record)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn error(&self) -> Option<&str> {
        self.0.get(fields::ERROR).and_then(Value::as_str)
    }

    pub fn is_fallback(&self) -> bool {
        self.contains(fields::ERROR)
    }

    pub fn total_characters(&self) -> Option<u64> {
        self.0.get(fields::TOTAL_CHARACTERS).and_then(Value::as_u64)
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.0)
    }
}
