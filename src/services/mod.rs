pub mod analysis_client;
pub mod fallback;
pub mod response_parser;
pub mod text_extractor;

pub use analysis_client::AnalysisClient;
pub use fallback::build_default;
pub use text_extractor::{count_characters, PdfTextExtractor, TextExtractor};
