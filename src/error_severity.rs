//! 終了コード決定に使うエラー深刻度
//!
//! 各レイヤー（domain, api, config, session）のエラーはすべて
//! `severity()` でこの型を返し、main.rs が終了コードに変換する。
//! このモジュール自体は他のモジュールに依存しない。

use std::fmt;

/// エラーの深刻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// 利用者が直せる入力の問題
    ///
    /// 画像形式が対象外、サイズ超過、画像未選択など。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定の問題
    ///
    /// サーバーURLが不正、設定ファイルが壊れているなど。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// 外部要因
    ///
    /// 分類サーバーに接続できない、タイムアウト、
    /// サーバー側で推論に失敗したなど。
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}
