//! 响应解析服务 - 业务能力层
//!
//! 从助手的原始回复中提取 JSON 对象。模型输出经常夹带说明文字或
//! Markdown 代码块，这里按"代码块 → 大括号范围"的顺序宽松提取，
//! 不校验字段是否齐全。

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::Record;
use regex::Regex;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)```").expect("fenced block regex")
});

/// 解析助手回复
pub fn parse(raw: &str) -> AnalysisResult<Record> {
    let body = fenced_content(raw).unwrap_or(raw).trim();

    let (start, end) = match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(AnalysisError::parse_failure(
                "回复中找不到 JSON 对象",
                raw,
            ))
        }
    };

    serde_json::from_str::<Record>(&body[start..=end])
        .map_err(|e| AnalysisError::parse_failure(format!("JSON 解析失败: {}", e), raw))
}

/// 第一个代码块的内容（支持带或不带语言标记）
fn fenced_content(raw: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
