//! 远程分析任务（Assistants API 中的 thread / run）

use std::fmt;

/// 对话上下文
///
/// 一次分析请求只创建一个，所有分析配置共用，请求结束后即丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationCtx {
    pub thread_id: String,
}

impl ConversationCtx {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
        }
    }
}

impl fmt::Display for ConversationCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[thread {}]", self.thread_id)
    }
}

/// 一次远程分析任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisJob {
    pub job_id: String,
    pub status: JobStatus,
}

/// 任务状态
///
/// `Pending → Running → {Completed | Failed | Expired | Cancelled}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Expired,
    Cancelled,
}

impl JobStatus {
    /// 从 Assistants API 的 run.status 字段解析
    ///
    /// 未知状态视为仍在运行，由轮询超时兜底
    pub fn from_wire(status: &str) -> Self {
        match status {
            "queued" => JobStatus::Pending,
            "completed" => JobStatus::Completed,
            "failed" | "incomplete" => JobStatus::Failed,
            "expired" => JobStatus::Expired,
            "cancelled" => JobStatus::Cancelled,
            _ => JobStatus::Running,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Pending | JobStatus::Running)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Expired => "expired",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
