/// プレゼンテーション層モジュール
///
/// コントローラーとコマンド結果をターミナル表示に橋渡しします。
/// プレゼンテーション層はセッション層・ドメイン層に依存しますが、その逆はありません。
///
/// # モジュール
/// - `display`: 結果・プレビュー・確率バーの行組み立て
/// - `input`: 対話セッションの入力処理
/// - `output`: コマンド結果の出力（人間向け・機械向け）
/// - `view`: `View` トレイトのターミナル実装
pub mod display;
pub mod input;
pub mod output;
pub mod view;
