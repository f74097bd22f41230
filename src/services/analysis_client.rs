//! 远程分析服务 - 业务能力层
//!
//! 只负责"跑一次分析配置"：提交文本 → 启动 run → 轮询 → 取回复 → 解析。
//! 不做重试，不关心配置之间的先后顺序。

use crate::clients::AssistantBackend;
use crate::error::{AnalysisError, AnalysisResult, RemoteFailure};
use crate::models::{AnalysisJob, AnalysisProfile, ConversationCtx, JobStatus, Record};
use crate::services::response_parser;
use crate::utils::truncate_text;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// 远程分析服务
pub struct AnalysisClient<B> {
    backend: B,
    poll_interval: Duration,
    job_timeout: Duration,
}

impl<B: AssistantBackend> AnalysisClient<B> {
    /// 创建新的分析服务
    ///
    /// # 参数
    /// - `backend`: 远程助手接口
    /// - `poll_interval`: 轮询间隔
    /// - `job_timeout`: 单个 run 的最长等待时间
    pub fn new(backend: B, poll_interval: Duration, job_timeout: Duration) -> Self {
        Self {
            backend,
            poll_interval,
            job_timeout,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 创建一次分析请求共用的对话上下文
    pub async fn create_context(&self) -> AnalysisResult<ConversationCtx> {
        self.backend.create_thread().await
    }

    /// 在共享上下文中运行一个分析配置
    ///
    /// 每次调用恰好追加一条用户消息、启动一个 run
    pub async fn run_profile(
        &self,
        ctx: &ConversationCtx,
        profile: &AnalysisProfile,
        content: &str,
    ) -> AnalysisResult<Record> {
        self.backend.add_user_message(ctx, content).await?;

        let job = self.backend.start_run(ctx, &profile.assistant_id).await?;
        info!("{} 🔍 [{}] run {} 已启动", ctx, profile.kind, job.job_id);

        self.wait_for_completion(ctx, &job, profile).await?;

        let raw = self
            .backend
            .latest_assistant_message(ctx, &job.job_id)
            .await?
            .ok_or_else(|| AnalysisError::EmptyResponse {
                thread_id: ctx.thread_id.clone(),
            })?;

        debug!("{} [{}] 助手回复: {}", ctx, profile.kind, truncate_text(&raw, 200));

        response_parser::parse(&raw)
    }

    /// 轮询直到 run 结束或超时
    async fn wait_for_completion(
        &self,
        ctx: &ConversationCtx,
        job: &AnalysisJob,
        profile: &AnalysisProfile,
    ) -> AnalysisResult<()> {
        let started = Instant::now();
        let mut status = job.status;

        loop {
            if status == JobStatus::Completed {
                info!(
                    "{} ✓ [{}] run {} 完成，用时 {:.1} 秒",
                    ctx,
                    profile.kind,
                    job.job_id,
                    started.elapsed().as_secs_f64()
                );
                return Ok(());
            }
            if status.is_terminal() {
                warn!("{} ❌ [{}] run {} 结束状态: {}", ctx, profile.kind, job.job_id, status);
                return Err(RemoteFailure::Terminal {
                    run_id: job.job_id.clone(),
                    status,
                }
                .into());
            }

            let elapsed = started.elapsed();
            if elapsed >= self.job_timeout {
                warn!(
                    "{} ⏱️ [{}] run {} 等待超时 (最后状态: {})",
                    ctx, profile.kind, job.job_id, status
                );
                return Err(AnalysisError::timeout(
                    format!("{} run {}", profile.kind, job.job_id),
                    elapsed,
                ));
            }

            tokio::time::sleep(self.poll_interval.min(self.job_timeout - elapsed)).await;
            status = self.backend.run_status(ctx, &job.job_id).await?;
        }
    }
}
