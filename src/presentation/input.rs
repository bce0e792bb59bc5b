/// プレゼンテーション層: ユーザー入力処理
///
/// 対話セッションで stdin から1行ずつ読み込み、
/// コントローラーへの操作（`SessionCommand`）に変換します。
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

/// 対話セッションの操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// ファイルを選択（パスは行の残り全体）
    Open(PathBuf),
    /// ドロップ（複数指定時は先頭のみ使われる）
    Drop(Vec<PathBuf>),
    Analyze,
    /// 画像を変更
    Change,
    /// 別の画像を解析
    Another,
    Status,
    Help,
    Quit,
}

/// 1行を操作に変換する。空行は None
pub fn parse_session_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "open" | "select" => {
            if rest.is_empty() {
                bail!("Please specify a file path: open <path>");
            }
            SessionCommand::Open(PathBuf::from(rest))
        }
        "drop" => SessionCommand::Drop(rest.split_whitespace().map(PathBuf::from).collect()),
        "analyze" | "submit" => SessionCommand::Analyze,
        "change" => SessionCommand::Change,
        "another" => SessionCommand::Another,
        "status" => SessionCommand::Status,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => bail!(
            "Unknown session command: '{}'. Type 'help' to see available commands.",
            other
        ),
    };

    Ok(Some(command))
}

/// 行単位の非同期入力
pub struct LineInput<R> {
    lines: Lines<BufReader<R>>,
}

impl LineInput<tokio::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }

    /// 次の1行を読む。入力終端では None
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        self.lines
            .next_line()
            .await
            .context("Failed to read from standard input")
    }
}
