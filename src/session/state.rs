/// 画面状態の状態機械
///
/// ```text
/// Idle ──FileAccepted──▶ PreviewReady ──Submit──▶ Loading ──Succeeded──▶ ResultShown
///                         ▲    │  ▲                 │
///                         └────┘  └─────Failed──────┘
///                      (差し替え)
/// 任意の状態 ──Reset──▶ Idle
/// ```
use serde::Serialize;
use std::fmt;

/// 画面状態（常にどれか1つ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    /// アップロード待ち
    Idle,
    /// プレビュー表示中、解析可能
    PreviewReady,
    /// 解析リクエスト送信中
    Loading,
    /// 結果表示中
    ResultShown,
}

/// 状態遷移のきっかけ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// 検証とプレビューを通過したファイルが確定した
    FileAccepted,
    /// 解析が要求された
    Submit,
    /// 分類に成功した
    Succeeded,
    /// 論理エラーまたは通信エラー
    Failed,
    /// リセット（画像変更 / 別の画像を解析）
    Reset,
}

impl UiState {
    /// イベントを適用した次の状態。遷移できない場合は None
    pub fn next(self, event: UiEvent) -> Option<UiState> {
        use UiEvent::*;
        use UiState::*;

        match (self, event) {
            (_, Reset) => Some(Idle),
            (Idle | PreviewReady, FileAccepted) => Some(PreviewReady),
            (PreviewReady, Submit) => Some(Loading),
            (Loading, Succeeded) => Some(ResultShown),
            (Loading, Failed) => Some(PreviewReady),
            _ => None,
        }
    }

    /// 解析ボタンが押せる状態か
    pub fn can_submit(self) -> bool {
        self.next(UiEvent::Submit).is_some()
    }

    /// 新しいファイルを受け付ける状態か
    pub fn accepts_file(self) -> bool {
        self.next(UiEvent::FileAccepted).is_some()
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::PreviewReady => "preview ready",
            Self::Loading => "loading",
            Self::ResultShown => "showing a result",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [UiState; 4] = [
        UiState::Idle,
        UiState::PreviewReady,
        UiState::Loading,
        UiState::ResultShown,
    ];

    #[test]
    fn test_happy_path() {
        let state = UiState::Idle;
        let state = state.next(UiEvent::FileAccepted).unwrap();
        assert_eq!(state, UiState::PreviewReady);
        let state = state.next(UiEvent::Submit).unwrap();
        assert_eq!(state, UiState::Loading);
        let state = state.next(UiEvent::Succeeded).unwrap();
        assert_eq!(state, UiState::ResultShown);
        assert_eq!(state.next(UiEvent::Reset), Some(UiState::Idle));
    }

    #[test]
    fn test_failure_returns_to_preview() {
        assert_eq!(
            UiState::Loading.next(UiEvent::Failed),
            Some(UiState::PreviewReady)
        );
    }

    #[test]
    fn test_reset_from_any_state() {
        for state in ALL {
            assert_eq!(state.next(UiEvent::Reset), Some(UiState::Idle));
        }
    }

    #[test]
    fn test_submit_only_from_preview() {
        let submittable: Vec<_> = ALL.into_iter().filter(|s| s.can_submit()).collect();
        assert_eq!(submittable, vec![UiState::PreviewReady]);
    }

    #[test]
    fn test_file_not_accepted_while_loading_or_showing_result() {
        assert!(UiState::Idle.accepts_file());
        assert!(UiState::PreviewReady.accepts_file());
        assert!(!UiState::Loading.accepts_file());
        assert!(!UiState::ResultShown.accepts_file());
    }

    #[test]
    fn test_invalid_transitions() {
        assert_eq!(UiState::Idle.next(UiEvent::Submit), None);
        assert_eq!(UiState::Idle.next(UiEvent::Succeeded), None);
        assert_eq!(UiState::ResultShown.next(UiEvent::Submit), None);
        assert_eq!(UiState::PreviewReady.next(UiEvent::Failed), None);
    }
}
