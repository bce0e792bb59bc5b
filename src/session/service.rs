/// 分類サービスの抽象
///
/// コントローラーはこのトレイト越しにサーバーと通信する。
/// 本番では `ApiClient`、テストではスタブを使う。
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::types::{ClassificationResponse, HealthResponse};
use crate::domain::file::SelectedFile;

#[allow(async_fn_in_trait)]
pub trait ClassificationService {
    /// 画像を送信して分類結果を受け取る
    async fn classify(&self, file: &SelectedFile) -> Result<ClassificationResponse, InfraError>;

    /// サーバーの稼働状況を問い合わせる
    async fn health(&self) -> Result<HealthResponse, InfraError>;
}

impl ClassificationService for ApiClient {
    async fn classify(&self, file: &SelectedFile) -> Result<ClassificationResponse, InfraError> {
        ApiClient::classify(self, file).await
    }

    async fn health(&self) -> Result<HealthResponse, InfraError> {
        ApiClient::health(self).await
    }
}

/// 共有参照越しに同じサービスを使う（コントローラーとヘルスチェックで共用）
impl<T: ClassificationService + ?Sized> ClassificationService for &T {
    async fn classify(&self, file: &SelectedFile) -> Result<ClassificationResponse, InfraError> {
        (**self).classify(file).await
    }

    async fn health(&self) -> Result<HealthResponse, InfraError> {
        (**self).health().await
    }
}
