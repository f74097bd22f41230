pub mod category;
pub mod job;
pub mod loaders;
pub mod profile;
pub mod report;

pub use category::{FormatCategory, QuestionType, ScopeCategory};
pub use job::{AnalysisJob, ConversationCtx, JobStatus};
pub use loaders::{load_all_pdf_uploads, ExamUpload};
pub use profile::{AnalysisProfile, ProfileKind};
pub use report::{fields, ExamReport, Record};
