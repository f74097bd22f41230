use crate::error::AnalysisResult;
use crate::models::{AnalysisJob, ConversationCtx, JobStatus};
use std::future::Future;

/// 远程助手服务接口
///
/// 流水线只依赖这个 trait，生产环境用 [`super::OpenAiAssistants`]，
/// 测试中可以换成内存实现
pub trait AssistantBackend: Send + Sync {
    /// 创建新的对话上下文
    fn create_thread(&self) -> impl Future<Output = AnalysisResult<ConversationCtx>> + Send;

    /// 在对话中追加一条用户消息
    fn add_user_message(
        &self,
        ctx: &ConversationCtx,
        content: &str,
    ) -> impl Future<Output = AnalysisResult<()>> + Send;

    /// 用指定助手启动一次 run
    fn start_run(
        &self,
        ctx: &ConversationCtx,
        assistant_id: &str,
    ) -> impl Future<Output = AnalysisResult<AnalysisJob>> + Send;

    /// 查询 run 当前状态
    fn run_status(
        &self,
        ctx: &ConversationCtx,
        job_id: &str,
    ) -> impl Future<Output = AnalysisResult<JobStatus>> + Send;

    /// 指定 run 产生的最新一条助手消息的文本，没有则返回 `None`
    fn latest_assistant_message(
        &self,
        ctx: &ConversationCtx,
        job_id: &str,
    ) -> impl Future<Output = AnalysisResult<Option<String>>> + Send;
}
