use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 待分析的上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

/// 上传文件被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    NotPdf,
    TooLarge { size: u64, limit: u64 },
}

/// 检查单个上传文件
pub fn check_upload(path: &Path, size: u64, max_bytes: u64) -> std::result::Result<(), UploadRejection> {
    let is_pdf = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(UploadRejection::NotPdf);
    }
    if size > max_bytes {
        return Err(UploadRejection::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    Ok(())
}

/// 扫描文件夹中所有可分析的 PDF，按文件名排序
pub async fn load_all_pdf_uploads(folder_path: &str, max_bytes: u64) -> Result<Vec<ExamUpload>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut uploads = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        match check_upload(&path, metadata.len(), max_bytes) {
            Ok(()) => {
                tracing::info!("正在加载: {} ({} 字节)", file_name, metadata.len());
                uploads.push(ExamUpload {
                    path,
                    file_name,
                    size: metadata.len(),
                });
            }
            Err(UploadRejection::NotPdf) => {
                tracing::warn!("跳过非 PDF 文件: {}", file_name);
            }
            Err(UploadRejection::TooLarge { size, limit }) => {
                tracing::warn!("文件过大，跳过: {} ({} > {} 字节)", file_name, size, limit);
            }
        }
    }

    uploads.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(uploads)
}
