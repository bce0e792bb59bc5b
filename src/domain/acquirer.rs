/// ドメインサービス: 入力ファイルの取得
///
/// 選択またはドロップされたパスから、検証済みの候補を読み込んで
/// `SelectedFile` を作る。バイト列の読み込みは検証を通過した後にだけ行う。
use crate::domain::error::DomainError;
use crate::domain::file::{FileCandidate, SelectedFile};
use crate::domain::validator;
use std::path::PathBuf;

/// ドロップされた複数ファイルのうち、対象にするもの（先頭の1件）
pub fn first_dropped(paths: &[PathBuf]) -> Option<&PathBuf> {
    paths.first()
}

/// 候補のバイト列を読み込む
///
/// 読み込み中にファイルが差し替えられても上限を超えないよう、
/// 実際のバイト数で再検証する。
pub async fn read_candidate(candidate: &FileCandidate) -> Result<SelectedFile, DomainError> {
    let bytes = tokio::fs::read(&candidate.path)
        .await
        .map_err(|source| DomainError::FileUnreadable {
            path: candidate.path.display().to_string(),
            source,
        })?;

    validator::validate_type_and_size(
        &candidate.name,
        &candidate.declared_mime,
        bytes.len() as u64,
    )?;

    Ok(SelectedFile::new(
        candidate.name.clone(),
        candidate.declared_mime.clone(),
        bytes,
    ))
}
