//! 单份试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责一份上传试卷的完整生命周期，相当于一次"分析请求"的处理者。
//!
//! ## 核心功能
//!
//! 1. **读取文件**：读取上传的 PDF
//! 2. **整体时限**：提取 + 分析整体受 `analysis_timeout` 约束，超时直接放弃进行中的 run
//! 3. **写出报告**：报告写入 `output_folder/<文件名>.json`
//! 4. **文件清理**：无论成功、失败还是超时都会删除上传文件

use crate::clients::AssistantBackend;
use crate::error::AnalysisError;
use crate::models::{ExamReport, ExamUpload};
use crate::services::{build_default, count_characters};
use crate::workflow::{AnalysisPipeline, ExamCtx};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// 单份试卷的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamOutcome {
    /// 三个分析配置全部成功
    Analyzed,
    /// 返回了兜底报告
    Fallback,
}

/// 处理参数
#[derive(Debug, Clone)]
pub struct ExamJobSettings {
    pub output_folder: PathBuf,
    pub analysis_timeout: Duration,
    pub delete_after_analysis: bool,
}

/// 处理单份试卷
///
/// # 参数
/// - `pipeline`: 共享的分析流程
/// - `upload`: 上传文件
/// - `exam_index`: 试卷索引（用于日志）
/// - `settings`: 输出目录、时限等
///
/// # 返回
/// 返回处理结果；只有读写文件失败时才返回错误
pub async fn process_exam<B: AssistantBackend>(
    pipeline: &AnalysisPipeline<B>,
    upload: &ExamUpload,
    exam_index: usize,
    settings: &ExamJobSettings,
) -> Result<ExamOutcome> {
    let ctx = ExamCtx::new(exam_index, &upload.file_name);
    let _cleanup = UploadCleanup::new(&upload.path, settings.delete_after_analysis, &ctx);

    log_exam_start(&ctx, upload.size);

    let bytes = tokio::fs::read(&upload.path)
        .await
        .with_context(|| format!("无法读取上传文件: {}", upload.path.display()))?;

    let report = analyze_with_deadline(pipeline, bytes, settings.analysis_timeout, &ctx).await;
    let outcome = if report.is_fallback() {
        ExamOutcome::Fallback
    } else {
        ExamOutcome::Analyzed
    };

    let report_path = write_report(&settings.output_folder, &upload.path, &report).await?;
    log_exam_complete(&ctx, &report, &report_path);

    Ok(outcome)
}

/// 带整体时限的分析
///
/// 时限同时覆盖文本提取和远程分析；超时后进行中的 run 被直接放弃
pub async fn analyze_with_deadline<B: AssistantBackend>(
    pipeline: &AnalysisPipeline<B>,
    bytes: Vec<u8>,
    limit: Duration,
    ctx: &ExamCtx,
) -> ExamReport {
    let started = Instant::now();
    let deadline = started + limit;

    let text = match tokio::time::timeout_at(deadline, pipeline.extract_text(bytes)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("{} ⚠️ {}", ctx, e);
            return build_default(0, &e.to_string());
        }
        Err(_) => {
            let e = AnalysisError::timeout("文本提取", started.elapsed());
            warn!("{} ⏱️ {}", ctx, e);
            return build_default(0, &e.to_string());
        }
    };

    info!("{} 📄 文本提取完成，字母数: {}", ctx, count_characters(&text));

    match tokio::time::timeout_at(deadline, pipeline.analyze(&text)).await {
        Ok(report) => report,
        Err(_) => {
            let e = AnalysisError::timeout("整体分析", started.elapsed());
            warn!("{} ⏱️ {}，进行中的 run 已放弃", ctx, e);
            build_default(count_characters(&text), &e.to_string())
        }
    }
}

/// 报告文件路径：`<output_folder>/<上传文件名去掉扩展名>.json`
pub fn report_path_for(output_folder: &Path, upload_path: &Path) -> PathBuf {
    let stem = upload_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    output_folder.join(format!("{}.json", stem))
}

async fn write_report(output_folder: &Path, upload_path: &Path, report: &ExamReport) -> Result<PathBuf> {
    let path = report_path_for(output_folder, upload_path);
    let json = report.to_pretty_json().context("无法序列化报告")?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("无法写入报告: {}", path.display()))?;
    Ok(path)
}

/// 上传文件清理守卫
///
/// 离开作用域时删除上传文件，覆盖所有返回路径
struct UploadCleanup {
    path: PathBuf,
    enabled: bool,
    label: String,
}

impl UploadCleanup {
    fn new(path: &Path, enabled: bool, ctx: &ExamCtx) -> Self {
        Self {
            path: path.to_path_buf(),
            enabled,
            label: ctx.to_string(),
        }
    }
}

impl Drop for UploadCleanup {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!("{} 🗑️ 上传文件已删除: {}", self.label, self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} ⚠️ 文件不存在: {}", self.label, self.path.display());
            }
            Err(e) => error!("{} 无法删除文件 {}: {}", self.label, self.path.display(), e),
        }
    }
}

// ========== 日志辅助函数 ==========

fn log_exam_start(ctx: &ExamCtx, size: u64) {
    info!("{} 开始分析", ctx);
    info!("{} 文件: {} ({} 字节)", ctx, ctx.file_name, size);
}

fn log_exam_complete(ctx: &ExamCtx, report: &ExamReport, report_path: &Path) {
    match report.error() {
        Some(message) => warn!("{} ⚠️ 已写出兜底报告: {}", ctx, message),
        None => info!("{} ✅ 试卷分析完成", ctx),
    }
    info!("{} 报告: {}", ctx, report_path.display());
}
