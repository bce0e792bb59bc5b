/// プレゼンテーション層: ターミナル表示面
///
/// コントローラーからの表示指示を stderr への出力に変換します。
/// stdout はパイプライン用に予約し、`--machine` 時は何も表示しません
/// （結果はコマンド側が JSON で出力する）。
use crate::domain::classification::RenderedResult;
use crate::domain::preview::Preview;
use crate::presentation::display;
use crate::session::view::{Notification, NotificationKind, ProbabilityBar, Region, View};
use std::cell::RefCell;

/// 表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// 1回限りのコマンド（操作案内は出さない）
    OneShot,
    /// 対話セッション（操作案内を出す）
    Interactive,
    /// 機械可読出力（表示しない）
    Silent,
}

pub struct TerminalView {
    mode: ViewMode,
    timezone_offset_seconds: i32,
    /// 表示中の結果（バー行の文言に使う）
    results: RefCell<Option<RenderedResult>>,
}

impl TerminalView {
    pub fn new(mode: ViewMode, timezone_offset_seconds: i32) -> Self {
        Self {
            mode,
            timezone_offset_seconds,
            results: RefCell::new(None),
        }
    }

    fn print(&self, line: &str) {
        if self.mode != ViewMode::Silent {
            eprintln!("{}", line);
        }
    }

    fn hint(&self, line: &str) {
        if self.mode == ViewMode::Interactive {
            eprintln!("{}", line);
        }
    }
}

impl View for TerminalView {
    fn show_upload_prompt(&self, visible: bool) {
        if visible {
            self.hint("Select a chest X-ray image: 'open <path>' or 'drop <path>...'");
        }
    }

    fn show_preview(&self, preview: Option<&Preview>) {
        if let Some(preview) = preview {
            self.print("");
            for line in display::preview_lines(preview) {
                self.print(&line);
            }
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        if enabled {
            self.hint("Type 'analyze' to classify the image, or 'change' to pick another.");
        }
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            self.print("Analyzing image...");
        }
    }

    fn show_results(&self, result: Option<&RenderedResult>) {
        *self.results.borrow_mut() = result.cloned();

        if let Some(result) = result {
            tracing::debug!(
                style = result.style.as_str(),
                tier = %result.tier,
                "rendering classification result"
            );
            self.print("");
            for line in display::result_lines(result, self.timezone_offset_seconds) {
                self.print(&line);
            }
            self.print("");
            self.print("  Probabilities:");
        }
    }

    fn set_bar_width(&self, bar: ProbabilityBar, percent: f64) {
        let results = self.results.borrow();
        let Some(result) = results.as_ref() else {
            return;
        };

        let text = match bar {
            ProbabilityBar::Normal => &result.normal_text,
            ProbabilityBar::Pneumonia => &result.pneumonia_text,
        };
        self.print(&display::bar_line(bar, percent, text));

        if bar == ProbabilityBar::Pneumonia {
            self.hint("\nType 'another' to analyze a different image.");
        }
    }

    fn clear_file_input(&self) {
        tracing::trace!("file input cleared");
    }

    fn scroll_into_view(&self, region: Region) {
        tracing::trace!(?region, "scroll into view");
        if region == Region::Upload {
            self.print("");
        }
    }

    fn notify(&self, notification: &Notification) {
        let prefix = match notification.kind {
            NotificationKind::Error => "✗",
            NotificationKind::Warning => "!",
            NotificationKind::Info => "i",
        };
        tracing::trace!(
            ttl_secs = notification.ttl.as_secs(),
            kind = ?notification.kind,
            "notification shown"
        );
        self.print(&format!("{} {}", prefix, notification.message));
    }
}
