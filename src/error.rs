use crate::models::JobStatus;
use thiserror::Error;

/// 分析流程错误类型
///
/// 所有变体都会在流水线边界被转换为兜底报告，不会直接抛给调用方
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 无法从文档中提取文本
    #[error("文本提取失败: {message}")]
    ExtractionFailure { message: String },

    /// run 或整体分析超时
    #[error("分析超时 ({stage}, 已等待 {elapsed_secs} 秒)")]
    Timeout { stage: String, elapsed_secs: u64 },

    /// 远程服务失败
    #[error("远程服务错误: {0}")]
    RemoteFailure(#[from] RemoteFailure),

    /// 对话中没有助手回复
    #[error("助手没有返回任何消息 (thread: {thread_id})")]
    EmptyResponse { thread_id: String },

    /// 助手回复中找不到可解析的 JSON
    #[error("响应解析失败: {message} (原文: {raw})")]
    ParseFailure { message: String, raw: String },
}

/// 远程服务错误
#[derive(Debug, Error)]
pub enum RemoteFailure {
    /// run 结束但不是 completed
    #[error("run {run_id} 以状态 {status} 结束")]
    Terminal { run_id: String, status: JobStatus },

    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {message}")]
    RequestFailed { endpoint: String, message: String },

    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必填项缺失
    #[error("配置项 {var_name} 未设置")]
    MissingValue { var_name: String },

    /// 配置值不合法
    #[error("配置项 {var_name} 的值 '{value}' 不合法")]
    InvalidValue { var_name: String, value: String },
}

// ========== 便捷构造函数 ==========

impl AnalysisError {
    pub fn extraction(source: impl std::fmt::Display) -> Self {
        AnalysisError::ExtractionFailure {
            message: source.to_string(),
        }
    }

    pub fn timeout(stage: impl Into<String>, elapsed: std::time::Duration) -> Self {
        AnalysisError::Timeout {
            stage: stage.into(),
            elapsed_secs: elapsed.as_secs(),
        }
    }

    pub fn parse_failure(message: impl Into<String>, raw: &str) -> Self {
        AnalysisError::ParseFailure {
            message: message.into(),
            raw: crate::utils::truncate_text(raw, 200),
        }
    }
}

impl RemoteFailure {
    pub fn request_failed(endpoint: impl Into<String>, source: impl std::fmt::Display) -> Self {
        RemoteFailure::RequestFailed {
            endpoint: endpoint.into(),
            message: source.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 分析结果类型
pub type AnalysisResult<T> = Result<T, AnalysisError>;
