//! 程序配置
//!
//! 默认值 → TOML 文件 → 环境变量，后者覆盖前者

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时分析的试卷数量
    pub max_concurrent_exams: usize,
    /// 待分析 PDF 存放目录
    pub input_folder: String,
    /// 分析报告输出目录
    pub output_folder: String,
    /// 分析结束后是否删除上传的 PDF
    pub delete_after_analysis: bool,
    /// 单个上传文件的大小上限（字节）
    pub max_upload_bytes: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- Assistants API 配置 ---
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub basic_assistant_id: String,
    pub format_assistant_id: String,
    pub types_assistant_id: String,
    // --- 时间控制（秒） ---
    /// 轮询 run 状态的间隔
    pub poll_interval_secs: u64,
    /// 单个 run 的最长等待时间
    pub job_timeout_secs: u64,
    /// 整份试卷分析的最长时间
    pub analysis_timeout_secs: u64,
    /// 单次 HTTP 请求超时
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_exams: 2,
            input_folder: "uploads".to_string(),
            output_folder: "reports".to_string(),
            delete_after_analysis: true,
            max_upload_bytes: 16 * 1024 * 1024,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            openai_api_key: String::new(),
            openai_api_base: "https://api.openai.com/v1".to_string(),
            basic_assistant_id: String::new(),
            format_assistant_id: String::new(),
            types_assistant_id: String::new(),
            poll_interval_secs: 2,
            job_timeout_secs: 300,
            analysis_timeout_secs: 600,
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，再叠加环境变量
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        let shared_assistant = std::env::var("OPENAI_ASSISTANT_ID").ok();
        let assistant = |key: &str, current: String| {
            std::env::var(key)
                .ok()
                .or_else(|| shared_assistant.clone())
                .unwrap_or(current)
        };

        Self {
            max_concurrent_exams: env_parse("MAX_CONCURRENT_EXAMS").unwrap_or(self.max_concurrent_exams),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(self.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(self.output_folder),
            delete_after_analysis: env_parse("DELETE_AFTER_ANALYSIS").unwrap_or(self.delete_after_analysis),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES").unwrap_or(self.max_upload_bytes),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or(self.openai_api_key),
            openai_api_base: std::env::var("OPENAI_API_BASE").unwrap_or(self.openai_api_base),
            basic_assistant_id: assistant("BASIC_ASSISTANT_ID", self.basic_assistant_id),
            format_assistant_id: assistant("FORMAT_ASSISTANT_ID", self.format_assistant_id),
            types_assistant_id: assistant("TYPES_ASSISTANT_ID", self.types_assistant_id),
            poll_interval_secs: env_parse("POLL_INTERVAL_SECS").unwrap_or(self.poll_interval_secs),
            job_timeout_secs: env_parse("JOB_TIMEOUT_SECS").unwrap_or(self.job_timeout_secs),
            analysis_timeout_secs: env_parse("ANALYSIS_TIMEOUT_SECS").unwrap_or(self.analysis_timeout_secs),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS").unwrap_or(self.request_timeout_secs),
        }
    }

    /// 检查必填项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai_api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                var_name: "OPENAI_API_KEY".to_string(),
            });
        }
        for (var_name, value) in [
            ("BASIC_ASSISTANT_ID", &self.basic_assistant_id),
            ("FORMAT_ASSISTANT_ID", &self.format_assistant_id),
            ("TYPES_ASSISTANT_ID", &self.types_assistant_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue {
                    var_name: var_name.to_string(),
                });
            }
        }
        for (var_name, value) in [
            ("MAX_CONCURRENT_EXAMS", self.max_concurrent_exams as u64),
            ("POLL_INTERVAL_SECS", self.poll_interval_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    var_name: var_name.to_string(),
                    value: "0".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.job_timeout_secs)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
