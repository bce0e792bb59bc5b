/// ドメイン層のエラー定義
///
/// 画像の取得・検証・プレビューに関するエラーを構造化して定義。
/// ネットワークのエラーは含まず、利用者の入力に起因する問題だけを表現する。
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// ファイルの読み込みに失敗
    #[error("failed to read file: {path}")]
    FileUnreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// 対象外の画像形式
    #[error("unsupported file type: {name} (expected: {expected}, found: {found})")]
    UnsupportedType {
        name: String,
        expected: String,
        found: String,
    },

    /// ファイルサイズが制限を超過
    #[error("file too large: {size} bytes (maximum allowed: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    /// 画像が選択されていない状態で解析が要求された
    #[error("no image selected")]
    NoFileSelected,

    /// 画像のデコードに失敗（プレビュー不可）
    #[error("failed to decode image for preview: {name} ({reason})")]
    PreviewFailed { name: String, reason: String },
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn unsupported_type(
        name: impl Into<String>,
        supported: &[&str],
        found: impl Into<String>,
    ) -> Self {
        Self::UnsupportedType {
            name: name.into(),
            expected: format!("one of: {}", supported.join(", ")),
            found: found.into(),
        }
    }

    pub fn preview_failed(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::PreviewFailed {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FileUnreadable { .. } => ErrorSeverity::SystemError,
            _ => ErrorSeverity::UserError,
        }
    }

    /// 画面の一時通知に表示するメッセージ
    pub fn user_message(&self) -> String {
        match self {
            Self::FileNotFound { path } => format!("File not found: {}", path),
            Self::NotAFile { path } => format!("'{}' is a directory, not a file", path),
            Self::FileUnreadable { .. } => "Unable to read the selected file.".to_string(),
            Self::UnsupportedType { .. } => {
                "Please upload a valid image file (JPG, JPEG, or PNG)".to_string()
            }
            Self::FileTooLarge { .. } => "File size should not exceed 16MB".to_string(),
            Self::NoFileSelected => "Please select an image first".to_string(),
            Self::PreviewFailed { .. } => {
                "Unable to read the selected image. Please choose another file.".to_string()
            }
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::FileUnreadable { .. } => Some("Check the file permissions."),
            Self::UnsupportedType { .. } => Some("Supported formats: jpg, jpeg, png"),
            Self::FileTooLarge { .. } => Some("Try resizing or re-encoding the X-ray image."),
            Self::NoFileSelected => Some("Open an image with 'open <path>' first."),
            Self::PreviewFailed { .. } => {
                Some("The file may be corrupted or its extension may not match its content.")
            }
        }
    }
}
