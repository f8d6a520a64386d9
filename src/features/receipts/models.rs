// 領収書機能のデータモデル

use crate::shared::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// ユーザーが選択した領収書ファイル
///
/// 中身はコアでは解釈せず、そのままストアに渡す。
#[derive(Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ReceiptFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ReceiptFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// ディスク上のファイルから読み込む
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let source_path = path.as_ref();
        if !source_path.exists() {
            return Err(AppError::not_found(format!(
                "領収書ファイル {}",
                source_path.display()
            )));
        }

        let file_name = source_path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                AppError::validation(format!(
                    "ファイル名の取得に失敗しました: {}",
                    source_path.display()
                ))
            })?;

        let bytes = fs::read(source_path)?;
        log::debug!("領収書ファイルを読み込みました: {file_name}, {} bytes", bytes.len());

        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// ファイル名の拡張子を小文字で取り出す
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
}

/// ファイル名からContent-Typeを取得
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// ファイル入力欄（1回の変更で1ファイル）
#[derive(Debug, Default)]
pub struct FileSelection {
    file: Option<ReceiptFile>,
}

impl FileSelection {
    pub fn new(file: ReceiptFile) -> Self {
        Self { file: Some(file) }
    }

    pub fn file(&self) -> Option<&ReceiptFile> {
        self.file.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }

    /// 入力欄を空にする
    pub fn clear(&mut self) {
        self.file = None;
    }

    /// 選択中のファイルを取り出す
    pub fn take(&mut self) -> Option<ReceiptFile> {
        self.file.take()
    }
}

/// ファイル検証の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum ValidationResult {
    Accepted { file_name: String, extension: String },
    Rejected { file_name: String, reason: String },
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("receipt.JPG"), Some("jpg".to_string()));
        assert_eq!(extension_of("dir/archive.tar.png"), Some("png".to_string()));
        assert_eq!(extension_of("receipt"), None);
        assert_eq!(extension_of("receipt."), None);
        assert_eq!(extension_of(".png"), None);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"testFile").unwrap();

        let receipt = ReceiptFile::from_path(file.path()).unwrap();
        assert!(receipt.file_name.ends_with(".jpg"));
        assert_eq!(receipt.content_type, "image/jpeg");
        assert_eq!(receipt.size(), 8);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReceiptFile::from_path(dir.path().join("missing.png"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_file_selection_clear() {
        let mut selection = FileSelection::new(ReceiptFile::new("a.png", vec![1]));
        assert!(!selection.is_empty());
        selection.clear();
        assert!(selection.is_empty());
        assert!(selection.take().is_none());
    }
}
