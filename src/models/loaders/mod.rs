pub mod pdf_loader;

pub use pdf_loader::{check_upload, load_all_pdf_uploads, ExamUpload, UploadRejection};
