/// ドメインサービス: ファイルバリデーション
///
/// 解析対象の画像候補を検証する。
/// 受け付けるMIMEタイプと最大サイズはAPP_CONFIGから取得します。
///
/// 検証は宣言MIMEタイプ → サイズの順で行い、どちらかに違反した候補は
/// 丸ごと破棄される（部分的な受理はしない）。
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use crate::domain::file::{FileCandidate, mime_from_extension};
use std::path::Path;

/// パスから検証前の候補を作る
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
pub fn inspect_path(path: &Path) -> Result<FileCandidate, DomainError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DomainError::file_not_found(display));
    }

    let metadata =
        std::fs::metadata(path).map_err(|_| DomainError::file_not_found(display.clone()))?;

    if metadata.is_dir() {
        return Err(DomainError::not_a_file(display));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(display);

    Ok(FileCandidate {
        name,
        path: path.to_path_buf(),
        declared_mime: mime_from_extension(path).to_string(),
        size: metadata.len(),
    })
}

/// 宣言MIMEタイプが受け付け対象か
pub fn is_supported_mime(mime: &str) -> bool {
    APP_CONFIG
        .upload
        .supported_mime_types
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(mime))
}

/// 候補を検証する
pub fn validate_candidate(candidate: &FileCandidate) -> Result<(), DomainError> {
    validate_type_and_size(&candidate.name, &candidate.declared_mime, candidate.size)
}

/// MIMEタイプとサイズを検証する
///
/// # エラー
/// - サポートされていない形式
/// - ファイルサイズが制限を超過（制限ちょうどは許可）
pub fn validate_type_and_size(name: &str, mime: &str, size: u64) -> Result<(), DomainError> {
    if !is_supported_mime(mime) {
        return Err(DomainError::unsupported_type(
            name,
            APP_CONFIG.upload.supported_mime_types,
            mime,
        ));
    }

    let max_file_size = APP_CONFIG.upload.max_file_size;
    if size > max_file_size {
        return Err(DomainError::FileTooLarge {
            size,
            max: max_file_size,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MAX: u64 = 16 * 1024 * 1024;

    #[test]
    fn test_supported_mime_types() {
        assert!(is_supported_mime("image/jpeg"));
        assert!(is_supported_mime("image/jpg"));
        assert!(is_supported_mime("image/png"));
        assert!(is_supported_mime("IMAGE/PNG"));
        assert!(!is_supported_mime("image/gif"));
        assert!(!is_supported_mime("application/octet-stream"));
        assert!(!is_supported_mime(""));
    }

    #[test]
    fn test_rejects_unsupported_types() {
        for mime in ["image/gif", "image/webp", "application/pdf", "text/plain"] {
            let result = validate_type_and_size("scan", mime, 1024);
            assert!(
                matches!(result, Err(DomainError::UnsupportedType { .. })),
                "{} should be rejected",
                mime
            );
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_type_and_size("a.png", "image/png", MAX).is_ok());

        match validate_type_and_size("a.png", "image/png", MAX + 1) {
            Err(DomainError::FileTooLarge { size, max }) => {
                assert_eq!(size, MAX + 1);
                assert_eq!(max, MAX);
            }
            other => panic!("Expected FileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_type_is_checked_before_size() {
        let result = validate_type_and_size("a.gif", "image/gif", MAX * 2);
        assert!(matches!(result, Err(DomainError::UnsupportedType { .. })));
    }

    #[test]
    fn test_inspect_path_reads_metadata() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("Chest.JPEG");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let candidate = inspect_path(&path).expect("inspect should succeed");
        assert_eq!(candidate.name, "Chest.JPEG");
        assert_eq!(candidate.declared_mime, "image/jpeg");
        assert_eq!(candidate.size, 2048);
        assert!(validate_candidate(&candidate).is_ok());
    }

    #[test]
    fn test_inspect_path_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let result = inspect_path(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(DomainError::FileNotFound { .. })));
    }

    #[test]
    fn test_inspect_path_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let result = inspect_path(dir.path());
        assert!(matches!(result, Err(DomainError::NotAFile { .. })));
    }
}
