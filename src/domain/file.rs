/// ドメイン層: 選択ファイルの型定義
///
/// `FileCandidate` は検証前の候補、`SelectedFile` は検証とプレビューを
/// 通過して解析対象になったファイルを表します。
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 拡張子から判定できない場合のMIMEタイプ
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// 拡張子から宣言MIMEタイプを求める
///
/// ブラウザが `File.type` を決めるのと同じく、中身ではなく拡張子だけを見る。
pub fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("dcm") => "application/dicom",
        _ => UNKNOWN_MIME,
    }
}

/// 検証前のファイル候補
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// 表示用ファイル名
    pub name: String,
    /// ファイルパス
    pub path: PathBuf,
    /// 宣言MIMEタイプ
    pub declared_mime: String,
    /// サイズ(バイト)
    pub size: u64,
}

/// 解析対象として受理されたファイル
///
/// バイト列は `Arc` で保持し、プレビュー処理へ渡すときにコピーしない。
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: Arc::from(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
