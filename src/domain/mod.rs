//! ドメイン層
//!
//! 画像の取得・検証・プレビューと、分類結果の表示属性への変換。
//! ネットワークや表示方法には依存しない。

pub mod acquirer;
pub mod classification;
pub mod error;
pub mod file;
pub mod formatter;
pub mod preview;
pub mod validator;
