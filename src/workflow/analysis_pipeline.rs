//! 试卷分析流程 - 流程层
//!
//! 核心职责：定义"一份试卷"的完整分析流程
//!
//! 流程顺序：
//! 1. 创建一个共享的对话上下文
//! 2. basic → format → types 依次运行，任一失败立即返回兜底报告
//! 3. 按字段归属合并各配置的记录
//! 4. 本地统计字母数并覆盖 `total_characters`
//! 5. 缺失字段用兜底默认值补齐

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::clients::AssistantBackend;
use crate::config::Config;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{fields, AnalysisProfile, ExamReport, ProfileKind, Record};
use crate::services::fallback;
use crate::services::{count_characters, AnalysisClient, PdfTextExtractor, TextExtractor};

/// `highest_difficulty_vocab` 最多保留的词数
const MAX_VOCAB: usize = 3;

/// 试卷分析流程
///
/// - 持有远程分析服务和文本提取器（注入，不使用全局单例）
/// - 不持有任何请求级别的状态，可在多个任务间共享
pub struct AnalysisPipeline<B> {
    client: AnalysisClient<B>,
    profiles: Vec<AnalysisProfile>,
    extractor: Arc<dyn TextExtractor>,
}

impl<B: AssistantBackend> AnalysisPipeline<B> {
    pub fn new(
        client: AnalysisClient<B>,
        profiles: Vec<AnalysisProfile>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            client,
            profiles,
            extractor,
        }
    }

    /// 按配置组装流程（PDF 提取器 + basic/format/types 三个配置）
    pub fn from_config(backend: B, config: &Config) -> Self {
        let client = AnalysisClient::new(backend, config.poll_interval(), config.job_timeout());
        Self::new(
            client,
            AnalysisProfile::all_from_config(config),
            Arc::new(PdfTextExtractor),
        )
    }

    pub fn client(&self) -> &AnalysisClient<B> {
        &self.client
    }

    /// 分析已提取的试卷文本，永远返回字段齐全的报告
    pub async fn analyze(&self, text: &str) -> ExamReport {
        let character_count = count_characters(text);

        match self.run_profiles(text).await {
            Ok(records) => merge_records(records, character_count),
            Err(e) => {
                warn!("⚠️ 分析失败，返回兜底报告: {}", e);
                fallback::build_default(character_count, &e.to_string())
            }
        }
    }

    /// 从原始文档字节开始分析
    ///
    /// 文本提取失败时 `total_characters` 为 0
    pub async fn analyze_document(&self, bytes: Vec<u8>) -> ExamReport {
        match self.extract_text(bytes).await {
            Ok(text) => self.analyze(&text).await,
            Err(e) => {
                warn!("⚠️ {}", e);
                fallback::build_default(0, &e.to_string())
            }
        }
    }

    /// 在阻塞线程上提取文本
    pub async fn extract_text(&self, bytes: Vec<u8>) -> AnalysisResult<String> {
        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(AnalysisError::extraction)??;

        debug!("文本提取完成: {} 字符", text.chars().count());
        Ok(text)
    }

    /// 在同一个上下文中依次运行全部配置
    async fn run_profiles(&self, text: &str) -> AnalysisResult<Vec<(ProfileKind, Record)>> {
        let ctx = self.client.create_context().await?;
        info!("{} 对话上下文已创建，共 {} 个分析配置", ctx, self.profiles.len());

        let mut records = Vec::with_capacity(self.profiles.len());
        for profile in &self.profiles {
            let record = self.client.run_profile(&ctx, profile, text).await?;
            info!("{} ✓ [{}] 返回 {} 个字段", ctx, profile.kind, record.len());
            records.push((profile.kind, record));
        }

        Ok(records)
    }
}

/// 合并各配置的记录
///
/// 每个配置只贡献自己负责的字段，`total_characters` 总是使用本地统计值
pub fn merge_records(records: Vec<(ProfileKind, Record)>, character_count: u64) -> ExamReport {
    let mut merged = Record::new();

    for (kind, mut record) in records {
        for field in kind.owned_fields() {
            if let Some(value) = record.remove(*field) {
                merged.insert(field.to_string(), value);
            }
        }
        if !record.is_empty() {
            debug!(
                "[{}] 忽略不属于该配置的字段: {:?}",
                kind,
                record.keys().collect::<Vec<_>>()
            );
        }
    }

    merged.insert(fields::TOTAL_CHARACTERS.to_string(), json!(character_count));
    fill_gaps(&mut merged);

    ExamReport::from_record(merged)
}

/// 补齐缺失字段和缺失分类
///
/// 值为 `null` 或类型与默认值不一致的字段按缺失处理
fn fill_gaps(report: &mut Record) {
    for field in fields::REQUIRED {
        let Some(default) = fallback::default_field(field) else {
            continue;
        };
        let usable = report
            .get(field)
            .is_some_and(|value| same_json_type(value, &default));
        if !usable {
            warn!("字段 {} 缺失或类型错误，使用默认值", field);
            report.insert(field.to_string(), default);
        }
    }

    fill_categories(report, fields::QUESTION_TYPES, fallback::default_question_types());
    fill_categories(report, fields::QUESTION_FORMAT, fallback::default_question_format());
    fill_categories(report, fields::QUESTION_SCOPE, fallback::default_question_scope());

    if let Some(Value::Array(vocab)) = report.get_mut(fields::HIGHEST_DIFFICULTY_VOCAB) {
        vocab.truncate(MAX_VOCAB);
    }
}

/// 补齐缺失分类，以及分类条目内缺失或类型错误的键
fn fill_categories(report: &mut Record, field: &str, defaults: Map<String, Value>) {
    let Some(Value::Object(categories)) = report.get_mut(field) else {
        return;
    };

    for (label, default) in defaults {
        let entry = categories.entry(label).or_insert_with(|| default.clone());
        if !entry.is_object() {
            *entry = default;
            continue;
        }
        if let (Value::Object(entry_map), Value::Object(default_map)) = (entry, &default) {
            for (key, default_value) in default_map {
                let usable = entry_map
                    .get(key)
                    .is_some_and(|value| same_json_type(value, default_value));
                if !usable {
                    entry_map.insert(key.clone(), default_value.clone());
                }
            }
        }
    }
}

fn same_json_type(value: &Value, expected: &Value) -> bool {
    matches!(
        (value, expected),
        (Value::String(_), Value::String(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
            | (Value::Bool(_), Value::Bool(_))
    )
}
