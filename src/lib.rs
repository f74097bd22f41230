//! # Exam Analyzer
//!
//! 英语试卷 PDF 分析工具：提取文本后交给远程 Assistants 服务，
//! 生成学校、题型、出题范围、难词等结构化报告
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 与远程服务交互，只暴露能力
//! - `AssistantBackend` - thread / message / run 接口
//! - `OpenAiAssistants` - 基于 async-openai 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个分析配置
//! - `AnalysisClient` - 提交 → 轮询 → 取回复
//! - `response_parser` - 从回复中提取 JSON
//! - `fallback` - 字段齐全的兜底报告
//! - `text_extractor` - PDF 文本提取与字母统计
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份试卷"的完整分析流程
//! - `AnalysisPipeline` - basic → format → types → 合并 → 补缺
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，管理并发
//! - `orchestrator/exam_processor` - 单份试卷处理器，时限、报告、文件清理
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AssistantBackend, OpenAiAssistants};
pub use config::Config;
pub use error::{AnalysisError, AnalysisResult, ConfigError, RemoteFailure};
pub use models::{AnalysisProfile, ExamReport, JobStatus, ProfileKind};
pub use orchestrator::{App, ProcessingStats};
pub use services::build_default;
pub use workflow::AnalysisPipeline;
