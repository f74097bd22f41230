//! 测试用的内存版远程服务
#![allow(dead_code)]

use exam_analyzer::clients::AssistantBackend;
use exam_analyzer::error::{AnalysisError, AnalysisResult};
use exam_analyzer::models::{AnalysisJob, AnalysisProfile, ConversationCtx, JobStatus, ProfileKind};
use exam_analyzer::services::{AnalysisClient, TextExtractor};
use exam_analyzer::AnalysisPipeline;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASIC: &str = "asst_basic";
pub const FORMAT: &str = "asst_format";
pub const TYPES: &str = "asst_types";

/// 单个助手的脚本：依次返回的状态（最后一个会一直重复）和最终回复
#[derive(Debug, Clone)]
struct ProfileScript {
    statuses: VecDeque<JobStatus>,
    reply: Option<String>,
}

/// 按脚本回放的 Assistants 服务
#[derive(Default)]
pub struct ScriptedBackend {
    threads_created: AtomicUsize,
    scripts: Mutex<HashMap<String, ProfileScript>>,
    messages: Mutex<Vec<(String, String)>>,
    runs: Mutex<Vec<(String, String)>>,
    last_run_by_thread: Mutex<HashMap<String, String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为助手设置脚本
    pub fn with_profile(self, assistant_id: &str, statuses: Vec<JobStatus>, reply: Option<&str>) -> Self {
        self.scripts.lock().unwrap().insert(
            assistant_id.to_string(),
            ProfileScript {
                statuses: statuses.into(),
                reply: reply.map(str::to_string),
            },
        );
        self
    }

    /// 立即完成并返回 `reply`
    pub fn completing(self, assistant_id: &str, reply: &str) -> Self {
        self.with_profile(assistant_id, vec![JobStatus::Running, JobStatus::Completed], Some(reply))
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    /// 已启动的 run：(thread_id, assistant_id)
    pub fn runs_started(&self) -> Vec<(String, String)> {
        self.runs.lock().unwrap().clone()
    }

    /// 已追加的用户消息：(thread_id, content)
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }

    fn run_id(assistant_id: &str, thread_id: &str) -> String {
        format!("run_{}_{}", assistant_id, thread_id)
    }
}

impl AssistantBackend for ScriptedBackend {
    async fn create_thread(&self) -> AnalysisResult<ConversationCtx> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ConversationCtx::new(format!("thread_{}", n)))
    }

    async fn add_user_message(&self, ctx: &ConversationCtx, content: &str) -> AnalysisResult<()> {
        self.messages
            .lock()
            .unwrap()
            .push((ctx.thread_id.clone(), content.to_string()));
        Ok(())
    }

    async fn start_run(&self, ctx: &ConversationCtx, assistant_id: &str) -> AnalysisResult<AnalysisJob> {
        if !self.scripts.lock().unwrap().contains_key(assistant_id) {
            return Err(exam_analyzer::RemoteFailure::BadResponse {
                endpoint: format!("threads/{}/runs", ctx.thread_id),
                status: 404,
                body: format!("No assistant found with id '{}'.", assistant_id),
            }
            .into());
        }
        self.runs
            .lock()
            .unwrap()
            .push((ctx.thread_id.clone(), assistant_id.to_string()));
        self.last_run_by_thread
            .lock()
            .unwrap()
            .insert(ctx.thread_id.clone(), assistant_id.to_string());

        Ok(AnalysisJob {
            job_id: Self::run_id(assistant_id, &ctx.thread_id),
            status: JobStatus::Pending,
        })
    }

    async fn run_status(&self, ctx: &ConversationCtx, job_id: &str) -> AnalysisResult<JobStatus> {
        let assistant_id = self
            .last_run_by_thread
            .lock()
            .unwrap()
            .get(&ctx.thread_id)
            .cloned()
            .unwrap_or_default();
        assert_eq!(job_id, Self::run_id(&assistant_id, &ctx.thread_id));

        let mut scripts = self.scripts.lock().unwrap();
        let script = scripts.get_mut(&assistant_id).expect("script");
        let status = if script.statuses.len() > 1 {
            script.statuses.pop_front().unwrap_or(JobStatus::Running)
        } else {
            script.statuses.front().copied().unwrap_or(JobStatus::Running)
        };
        Ok(status)
    }

    async fn latest_assistant_message(
        &self,
        ctx: &ConversationCtx,
        job_id: &str,
    ) -> AnalysisResult<Option<String>> {
        let assistant_id = self.last_run_by_thread.lock().unwrap().get(&ctx.thread_id).cloned();
        let scripts = self.scripts.lock().unwrap();
        Ok(assistant_id
            .filter(|id| Self::run_id(id, &ctx.thread_id) == job_id)
            .and_then(|id| scripts.get(&id))
            .and_then(|s| s.reply.clone()))
    }
}

/// 返回固定文本的提取器
pub struct FixedText(pub String);

impl TextExtractor for FixedText {
    fn extract(&self, _bytes: &[u8]) -> AnalysisResult<String> {
        Ok(self.0.clone())
    }
}

/// 永远失败的提取器
pub struct BrokenPdf;

impl TextExtractor for BrokenPdf {
    fn extract(&self, _bytes: &[u8]) -> AnalysisResult<String> {
        Err(AnalysisError::extraction("PDF 头部损坏"))
    }
}

/// 记录同时进行中的提取数量的提取器
pub struct CountingExtractor {
    text: String,
    hold: Duration,
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl CountingExtractor {
    pub fn new(text: &str, hold: Duration) -> Self {
        Self {
            text: text.to_string(),
            hold,
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl TextExtractor for CountingExtractor {
    fn extract(&self, _bytes: &[u8]) -> AnalysisResult<String> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.hold);
        self.current.fetch_sub(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

pub fn profiles() -> Vec<AnalysisProfile> {
    vec![
        AnalysisProfile::new(ProfileKind::Basic, BASIC),
        AnalysisProfile::new(ProfileKind::Format, FORMAT),
        AnalysisProfile::new(ProfileKind::Types, TYPES),
    ]
}

pub fn client(backend: ScriptedBackend, job_timeout: Duration) -> AnalysisClient<ScriptedBackend> {
    AnalysisClient::new(backend, Duration::from_millis(2), job_timeout)
}

pub fn pipeline_with(
    backend: ScriptedBackend,
    extractor: Arc<dyn TextExtractor>,
    job_timeout: Duration,
) -> AnalysisPipeline<ScriptedBackend> {
    AnalysisPipeline::new(client(backend, job_timeout), profiles(), extractor)
}

pub fn pipeline(backend: ScriptedBackend) -> AnalysisPipeline<ScriptedBackend> {
    pipeline_with(
        backend,
        Arc::new(FixedText(String::new())),
        Duration::from_millis(500),
    )
}

/// 三个配置都成功的后端
pub fn successful_backend() -> ScriptedBackend {
    ScriptedBackend::new()
        .completing(BASIC, BASIC_REPLY)
        .completing(FORMAT, FORMAT_REPLY)
        .completing(TYPES, TYPES_REPLY)
}

pub const BASIC_REPLY: &str = r#"분석 결과입니다.
```json
{
  "school_name": "한빛고등학교",
  "publisher": "능률",
  "grade": "2",
  "exam_type": "1학기 중간고사",
  "total_questions": 30,
  "total_characters": 123456,
  "highest_difficulty_vocab": ["ubiquitous", "meticulous", "ephemeral"]
}
```"#;

pub const FORMAT_REPLY: &str = r#"{
  "question_format": {
    "multiple_choice": {"count": 25, "numbers": [1, 2, 3]},
    "subjective": {"count": 5, "numbers": [26, 27, 28, 29, 30]}
  },
  "question_scope": {
    "교과서": {"chapters": ["Lesson 1", "Lesson 2"], "count": 20, "numbers": [1, 2]},
    "모의고사": {"chapters": ["2023 6월"], "count": 8, "numbers": [21]},
    "부교재": {"chapters": [], "count": 2, "numbers": [29, 30]}
  }
}"#;

pub const TYPES_REPLY: &str = r#"```
{"question_types": {"빈칸 추론": {"count": 4, "numbers": [11, 12, 13, 14]}, "주제 파악": {"count": 1, "numbers": [3]}}}
```"#;

/// 每个测试独立的临时目录
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("exam_analyzer_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
