pub mod analysis_pipeline;
pub mod exam_ctx;

pub use analysis_pipeline::{merge_records, AnalysisPipeline};
pub use exam_ctx::ExamCtx;
