/// ドメインサービス: 画像プレビュー
///
/// 受理前のファイルをデコードして表示可能な形（寸法・形式・data URL）に変換します。
/// デコードはCPUを使うため `spawn_blocking` で実行し、呼び出し側には
/// 完了時の結果だけを返します。
use crate::domain::error::DomainError;
use crate::domain::file::SelectedFile;
use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;

/// 表示用のプレビュー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub file_name: String,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
    /// 実際にデコードされた形式（例: "png", "jpg"）
    pub format: String,
    /// `data:<mime>;base64,...` 形式の画像ソース
    #[serde(skip)]
    pub data_url: String,
}

/// プレビューを非同期に生成する
pub async fn render_preview(file: &SelectedFile) -> Result<Preview, DomainError> {
    let name = file.name().to_string();
    let mime = file.mime().to_string();
    let bytes = file.shared_bytes();

    let decoded = tokio::task::spawn_blocking(move || decode_preview(&bytes, &mime))
        .await
        .map_err(|e| DomainError::preview_failed(name.clone(), e))?
        .map_err(|e| DomainError::preview_failed(name.clone(), e))?;

    Ok(Preview {
        file_name: name,
        size_bytes: file.size(),
        ..decoded
    })
}

/// 画像をデコードしてプレビューを作る
///
/// `file_name` / `size_bytes` は呼び出し側で埋める。
pub fn decode_preview(bytes: &[u8], mime: &str) -> Result<Preview, image::ImageError> {
    let format = image::guess_format(bytes)?;
    let image = image::load_from_memory_with_format(bytes, format)?;

    let format_name = format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or("unknown")
        .to_string();

    Ok(Preview {
        file_name: String::new(),
        size_bytes: bytes.len() as u64,
        width: image.width(),
        height: image.height(),
        format: format_name,
        data_url: to_data_url(bytes, mime),
    })
}

/// バイト列を data URL に変換
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url(b"abc", "image/png"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_decode_png() {
        let bytes = test_support::png_bytes(8, 4);
        let preview = decode_preview(&bytes, "image/png").expect("png should decode");

        assert_eq!(preview.width, 8);
        assert_eq!(preview.height, 4);
        assert_eq!(preview.format, "png");
        assert!(preview.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = test_support::jpeg_bytes(16, 16);
        let preview = decode_preview(&bytes, "image/jpeg").expect("jpeg should decode");
        assert_eq!(preview.width, 16);
        assert!(preview.format == "jpg" || preview.format == "jpeg");
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_preview(b"definitely not an image", "image/png").is_err());
        assert!(decode_preview(&[], "image/png").is_err());
    }

    #[tokio::test]
    async fn test_render_preview_fills_file_details() {
        let bytes = test_support::png_bytes(6, 3);
        let size = bytes.len() as u64;
        let file = SelectedFile::new("chest.png", "image/png", bytes);

        let preview = render_preview(&file).await.expect("preview should succeed");
        assert_eq!(preview.file_name, "chest.png");
        assert_eq!(preview.size_bytes, size);
        assert_eq!((preview.width, preview.height), (6, 3));
    }

    #[tokio::test]
    async fn test_render_preview_failure_is_domain_error() {
        let file = SelectedFile::new("broken.png", "image/png", b"\x89PNG broken".to_vec());
        let result = render_preview(&file).await;
        assert!(matches!(result, Err(DomainError::PreviewFailed { .. })));
    }
}
