//! Assistants API 客户端
//!
//! 通过 `async-openai` 调用 threads / messages / runs 三组接口

use crate::clients::AssistantBackend;
use crate::config::Config;
use crate::error::{AnalysisResult, RemoteFailure};
use crate::models::{AnalysisJob, ConversationCtx, JobStatus};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    traits::RequestOptionsBuilder,
    types::assistants::{
        CreateMessageRequestArgs, CreateRunRequestArgs, CreateThreadRequest, MessageContent,
        MessageObject, MessageRole, RunStatus,
    },
    Client,
};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// 取回复时最多查看的消息条数
const MESSAGE_PAGE_SIZE: &str = "20";

/// Assistants API 客户端
pub struct OpenAiAssistants {
    client: Client<OpenAIConfig>,
    request_timeout: Duration,
}

impl OpenAiAssistants {
    /// 创建新的客户端（兼容 OpenAI API 的服务）
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.openai_api_key)
            .with_api_base(config.openai_api_base.trim_end_matches('/'));

        Self {
            client: Client::with_config(openai_config),
            request_timeout: config.request_timeout(),
        }
    }

    /// 带超时地执行一次接口调用，错误统一转换为 [`RemoteFailure`]
    async fn call<T>(
        &self,
        endpoint: &str,
        request: impl Future<Output = Result<T, OpenAIError>>,
    ) -> AnalysisResult<T> {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("Assistants API 调用失败: {} {}", endpoint, e);
                Err(RemoteFailure::request_failed(endpoint, e).into())
            }
            Err(_) => {
                warn!("Assistants API 请求超时: {}", endpoint);
                Err(RemoteFailure::request_failed(
                    endpoint,
                    format!("请求超时 ({} 秒)", self.request_timeout.as_secs()),
                )
                .into())
            }
        }
    }
}

impl AssistantBackend for OpenAiAssistants {
    async fn create_thread(&self) -> AnalysisResult<ConversationCtx> {
        let thread = self
            .call("threads", self.client.threads().create(CreateThreadRequest::default()))
            .await?;
        debug!("已创建 thread: {}", thread.id);
        Ok(ConversationCtx::new(thread.id))
    }

    async fn add_user_message(&self, ctx: &ConversationCtx, content: &str) -> AnalysisResult<()> {
        let endpoint = format!("threads/{}/messages", ctx.thread_id);
        let request = CreateMessageRequestArgs::default()
            .role(MessageRole::User)
            .content(content)
            .build()
            .map_err(|e| RemoteFailure::request_failed(&endpoint, e))?;

        let message = self
            .call(&endpoint, self.client.threads().messages(&ctx.thread_id).create(request))
            .await?;
        debug!("{} 已追加用户消息 {} ({} 字节)", ctx, message.id, content.len());
        Ok(())
    }

    async fn start_run(&self, ctx: &ConversationCtx, assistant_id: &str) -> AnalysisResult<AnalysisJob> {
        let endpoint = format!("threads/{}/runs", ctx.thread_id);
        let request = CreateRunRequestArgs::default()
            .assistant_id(assistant_id)
            .build()
            .map_err(|e| RemoteFailure::request_failed(&endpoint, e))?;

        let run = self
            .call(&endpoint, self.client.threads().runs(&ctx.thread_id).create(request))
            .await?;
        let status = job_status(&run.status);
        debug!("{} 已启动 run {} (状态: {})", ctx, run.id, status);

        Ok(AnalysisJob { job_id: run.id, status })
    }

    async fn run_status(&self, ctx: &ConversationCtx, job_id: &str) -> AnalysisResult<JobStatus> {
        let endpoint = format!("threads/{}/runs/{}", ctx.thread_id, job_id);
        let run = self
            .call(&endpoint, self.client.threads().runs(&ctx.thread_id).retrieve(job_id))
            .await?;

        if let Some(last_error) = &run.last_error {
            warn!(
                "{} run {} 报告错误: {:?} {}",
                ctx, job_id, last_error.code, last_error.message
            );
        }

        Ok(job_status(&run.status))
    }

    async fn latest_assistant_message(
        &self,
        ctx: &ConversationCtx,
        job_id: &str,
    ) -> AnalysisResult<Option<String>> {
        let endpoint = format!("threads/{}/messages", ctx.thread_id);
        let query = [("order", "desc"), ("limit", MESSAGE_PAGE_SIZE), ("run_id", job_id)];
        let list = self
            .call(
                &endpoint,
                self.client
                    .threads()
                    .messages(&ctx.thread_id)
                    .query(&query)
                    .map_err(|e| RemoteFailure::request_failed(&endpoint, e))?
                    .list(),
            )
            .await?;
        let replies: Vec<AssistantReply> = list.data.iter().map(AssistantReply::from).collect();
        Ok(reply_for_run(&replies, job_id))
    }
}

/// 把 run 的状态映射为 [`JobStatus`]
///
/// 按接口上的字符串取值映射，未知状态视为仍在运行
fn job_status(status: &RunStatus) -> JobStatus {
    match serde_json::to_value(status) {
        Ok(Value::String(wire)) => JobStatus::from_wire(&wire),
        _ => JobStatus::Running,
    }
}

/// 消息列表中与取回复有关的部分
#[derive(Debug, Clone, PartialEq)]
struct AssistantReply {
    from_assistant: bool,
    run_id: Option<String>,
    texts: Vec<String>,
}

impl From<&MessageObject> for AssistantReply {
    fn from(message: &MessageObject) -> Self {
        let texts = message
            .content
            .iter()
            .filter_map(|part| match part {
                MessageContent::Text(text) => Some(text.text.value.clone()),
                _ => None,
            })
            .collect();

        Self {
            from_assistant: matches!(message.role, MessageRole::Assistant),
            run_id: message.run_id.clone(),
            texts,
        }
    }
}

/// 取本次 run 产生的最新一条助手消息，拼接其全部文本片段
///
/// 列表按 `order=desc` 请求，所以第一条匹配即最新
fn reply_for_run(replies: &[AssistantReply], job_id: &str) -> Option<String> {
    let reply = replies
        .iter()
        .find(|r| r.from_assistant && r.run_id.as_deref() == Some(job_id))?;

    let text = reply.texts.join("\n");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(from_assistant: bool, run_id: Option<&str>, texts: &[&str]) -> AssistantReply {
        AssistantReply {
            from_assistant,
            run_id: run_id.map(str::to_string),
            texts: texts.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_reply_for_run_picks_newest_assistant_message() {
        let replies = vec![
            reply(true, Some("run_2"), &["{\"grade\": \"2\"}"]),
            reply(false, None, &["exam text"]),
            reply(true, Some("run_2"), &["older"]),
        ];

        assert_eq!(reply_for_run(&replies, "run_2").as_deref(), Some("{\"grade\": \"2\"}"));
    }

    #[test]
    fn test_reply_for_run_ignores_previous_runs() {
        let replies = vec![
            reply(false, None, &["exam text"]),
            reply(true, Some("run_basic"), &["{\"school_name\": \"한빛고\"}"]),
        ];

        assert_eq!(reply_for_run(&replies, "run_format"), None);
    }

    #[test]
    fn test_reply_for_run_joins_text_parts() {
        let replies = vec![reply(true, Some("run_1"), &["part one", "part two"])];
        assert_eq!(reply_for_run(&replies, "run_1").as_deref(), Some("part one\npart two"));
    }

    #[test]
    fn test_reply_for_run_none_when_blank() {
        assert_eq!(reply_for_run(&[reply(true, Some("run_1"), &["  "])], "run_1"), None);
        assert_eq!(reply_for_run(&[], "run_1"), None);
    }

    #[test]
    fn test_run_status_mapping() {
        assert_eq!(job_status(&RunStatus::Queued), JobStatus::Pending);
        assert_eq!(job_status(&RunStatus::InProgress), JobStatus::Running);
        assert_eq!(job_status(&RunStatus::RequiresAction), JobStatus::Running);
        assert_eq!(job_status(&RunStatus::Completed), JobStatus::Completed);
        assert_eq!(job_status(&RunStatus::Incomplete), JobStatus::Failed);
        assert_eq!(job_status(&RunStatus::Expired), JobStatus::Expired);
        assert_eq!(job_status(&RunStatus::Cancelled), JobStatus::Cancelled);
    }

    /// 需要真实的 OPENAI_API_KEY
    #[tokio::test]
    #[ignore]
    async fn test_create_thread_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let client = OpenAiAssistants::new(&config);
        let ctx = client.create_thread().await.unwrap();
        assert!(ctx.thread_id.starts_with("thread_"));
    }
}
