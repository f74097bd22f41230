//! 批量试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量试卷的调度和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、写日志文件头、创建 Assistants 客户端和分析流程
//! 2. **批量加载**：扫描并校验所有待分析的 PDF（`Vec<ExamUpload>`）
//! 3. **并发控制**：使用 Semaphore 限制同时分析的数量
//! 4. **任务隔离**：每份试卷在独立的 tokio 任务中运行，互不共享可变状态
//! 5. **全局统计**：汇总成功 / 兜底 / 出错数量

use crate::clients::{AssistantBackend, OpenAiAssistants};
use crate::config::Config;
use crate::models::{load_all_pdf_uploads, ExamUpload};
use crate::orchestrator::exam_processor::{self, ExamJobSettings, ExamOutcome};
use crate::utils::logging::{init_log_file, log_exams_loaded, log_startup, print_final_stats};
use crate::workflow::AnalysisPipeline;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

/// 应用主结构
pub struct App<B = OpenAiAssistants> {
    config: Config,
    pipeline: Arc<AnalysisPipeline<B>>,
}

impl App<OpenAiAssistants> {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(config.max_concurrent_exams, &config.input_folder);

        let backend = OpenAiAssistants::new(&config);
        let pipeline = AnalysisPipeline::from_config(backend, &config);

        Ok(Self::with_pipeline(config, pipeline))
    }
}

impl<B: AssistantBackend + 'static> App<B> {
    /// 使用已组装好的分析流程创建应用
    pub fn with_pipeline(config: Config, pipeline: AnalysisPipeline<B>) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let uploads = load_all_pdf_uploads(&self.config.input_folder, self.config.max_upload_bytes).await?;

        if uploads.is_empty() {
            warn!("⚠️ 没有找到待分析的 PDF 文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        tokio::fs::create_dir_all(&self.config.output_folder)
            .await
            .with_context(|| format!("无法创建输出目录: {}", self.config.output_folder))?;

        log_exams_loaded(uploads.len(), self.config.max_concurrent_exams);

        let stats = self.process_all_exams(uploads).await?;

        print_final_stats(
            stats.analyzed,
            stats.fallback,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 并发处理全部试卷
    async fn process_all_exams(&self, uploads: Vec<ExamUpload>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_exams));
        let settings = ExamJobSettings {
            output_folder: PathBuf::from(&self.config.output_folder),
            analysis_timeout: self.config.analysis_timeout(),
            delete_after_analysis: self.config.delete_after_analysis,
        };

        let mut stats = ProcessingStats {
            total: uploads.len(),
            ..Default::default()
        };
        let mut handles = Vec::with_capacity(uploads.len());

        for (idx, upload) in uploads.into_iter().enumerate() {
            let exam_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let pipeline = Arc::clone(&self.pipeline);
            let settings = settings.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = exam_processor::process_exam(&pipeline, &upload, exam_index, &settings).await;
                if let Err(e) = &result {
                    error!("[试卷 {}] ❌ 处理过程中发生错误: {:#}", exam_index, e);
                }
                result
            });
            handles.push((exam_index, handle));
        }

        for (exam_index, handle) in handles {
            match handle.await {
                Ok(Ok(ExamOutcome::Analyzed)) => stats.analyzed += 1,
                Ok(Ok(ExamOutcome::Fallback)) => stats.fallback += 1,
                Ok(Err(_)) => stats.failed += 1,
                Err(e) => {
                    error!("[试卷 {}] 任务执行失败: {}", exam_index, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub analyzed: usize,
    pub fallback: usize,
    pub failed: usize,
    pub total: usize,
}
