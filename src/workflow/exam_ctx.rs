//! 试卷处理上下文
//!
//! 封装"我正在处理第几份试卷、哪个文件"这一信息

use std::fmt::Display;

/// 试卷处理上下文
#[derive(Debug, Clone)]
pub struct ExamCtx {
    /// 试卷索引（仅用于日志显示，从1开始）
    pub exam_index: usize,

    /// 上传文件名
    pub file_name: String,
}

impl ExamCtx {
    pub fn new(exam_index: usize, file_name: impl Into<String>) -> Self {
        Self {
            exam_index,
            file_name: file_name.into(),
        }
    }
}

impl Display for ExamCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[试卷 {}]", self.exam_index)
    }
}
