//! 文本提取服务 - 业务能力层
//!
//! PDF 解析本身交给 `pdf-extract`，这里只做错误转换和字母统计

use crate::error::{AnalysisError, AnalysisResult};

/// 文档 → 纯文本
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> AnalysisResult<String>;
}

/// 基于 `pdf-extract` 的 PDF 文本提取
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> AnalysisResult<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(AnalysisError::extraction)
    }
}

/// 统计英文字母数量（去掉所有非 a-z / A-Z 字符）
pub fn count_characters(text: &str) -> u64 {
    text.chars().filter(char::is_ascii_alphabetic).count() as u64
}
