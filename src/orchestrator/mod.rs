//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度，是整个系统的"指挥中心"，相当于分析服务的请求处理者。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量试卷处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载上传的 PDF（Vec<ExamUpload>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `exam_processor` - 单份试卷处理器
//! - 读取上传文件
//! - 施加整体分析时限
//! - 写出报告
//! - 清理上传文件
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<ExamUpload>)
//!     ↓
//! exam_processor (处理单份试卷)
//!     ↓
//! workflow::AnalysisPipeline (basic → format → types → 合并)
//!     ↓
//! services (能力层：analysis_client / response_parser / fallback / text_extractor)
//!     ↓
//! clients (基础设施：Assistants API)
//! ```

pub mod batch_processor;
pub mod exam_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use exam_processor::{process_exam, ExamJobSettings, ExamOutcome};
