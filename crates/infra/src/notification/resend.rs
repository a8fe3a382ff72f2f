//! Resend 通知送信実装
//!
//! Resend（ホスト型トランザクションメール API）の `POST /emails` を
//! `reqwest` で呼び出してメールを送信する。本番環境で使用する。
//!
//! ## エラーの区別
//!
//! - HTTP 呼び出しが完了し、非成功ステータスが返った場合:
//!   [`NotificationError::ApiError`]（API が報告したメッセージを保持）
//! - HTTP 呼び出し自体が失敗した場合（ネットワークエラー等）:
//!   [`NotificationError::SendFailed`]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskline_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Resend API のデフォルトエンドポイント
const DEFAULT_API_BASE: &str = "https://api.resend.com";

/// Resend 通知送信
///
/// `reqwest::Client` をラップする。クライアントは接続プールを内包するため、
/// インスタンスはアプリケーション全体で共有する。
pub struct ResendNotificationSender {
    client:       reqwest::Client,
    api_base:     String,
    api_key:      String,
    from_address: String,
}

impl ResendNotificationSender {
    /// 新しい Resend 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_key`: Resend の API キー
    /// - `from_address`: 送信元メールアドレス（Resend でドメイン検証済みであること）
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            from_address,
        }
    }

    /// API エンドポイントを差し替える
    ///
    /// テストでモックサーバーに向ける場合に使用する。
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// `POST /emails` のリクエストボディ
///
/// 受信者は常に 1 件のリスト。
#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from:    &'a str,
    to:      [&'a str; 1],
    subject: &'a str,
    text:    &'a str,
    html:    &'a str,
}

/// Resend のエラーペイロード
///
/// `{"statusCode": 422, "name": "validation_error", "message": "..."}` 形式。
/// `message` 以外のフィールドは使用しない。
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[async_trait]
impl NotificationSender for ResendNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let request = SendEmailRequest {
            from:    &self.from_address,
            to:      [&email.to],
            subject: &email.subject,
            text:    &email.text_body,
            html:    &email.html_body,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // 呼び出しは完了したが API がエラーペイロードを返した
        let body = response
            .text()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        tracing::error!(
            status = %status,
            body = %body,
            to = %email.to,
            "Resend API がエラーを返却"
        );

        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body
                }
            });

        Err(NotificationError::ApiError(message))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    use super::*;

    fn make_email() -> EmailMessage {
        EmailMessage {
            to:        "a@b.com".to_string(),
            subject:   "Password Reset Request".to_string(),
            html_body: "<p>reset</p>".to_string(),
            text_body: "reset".to_string(),
        }
    }

    fn make_sender(server: &MockServer) -> ResendNotificationSender {
        ResendNotificationSender::new(
            "re_test_key".to_string(),
            "Taskline <noreply@taskline.example.com>".to_string(),
        )
        .with_api_base(server.uri())
    }

    #[tokio::test]
    async fn 成功時に期待どおりのリクエストを一度だけ送る() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test_key"))
            .and(body_partial_json(serde_json::json!({
                "from": "Taskline <noreply@taskline.example.com>",
                "to": ["a@b.com"],
                "subject": "Password Reset Request",
                "text": "reset",
                "html": "<p>reset</p>",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "4ef2a417-2c1e-4bd7-8f6e-1f2f3c4d5e6f"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sender = make_sender(&server);
        let result = sender.send_email(&make_email()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn apiがエラーペイロードを返した場合はapi_errorになる() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "boom",
            })))
            .mount(&server)
            .await;

        let sender = make_sender(&server);
        let err = sender.send_email(&make_email()).await.unwrap_err();

        assert!(matches!(err, NotificationError::ApiError(_)));
        assert!(err.to_string().contains("boom"), "{err}");
    }

    #[tokio::test]
    async fn エラーペイロードにmessageがない場合は本文をそのまま使う() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(r#"{"name":"internal_server_error"}"#),
            )
            .mount(&server)
            .await;

        let sender = make_sender(&server);
        let err = sender.send_email(&make_email()).await.unwrap_err();

        assert!(err.to_string().contains("internal_server_error"), "{err}");
    }

    #[tokio::test]
    async fn エラー本文が空の場合はunknown_errorになる() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sender = make_sender(&server);
        let err = sender.send_email(&make_email()).await.unwrap_err();

        assert!(err.to_string().contains("Unknown error"), "{err}");
    }

    #[tokio::test]
    async fn 接続できない場合はsend_failedになる() {
        // 起動していないポートに向ける
        let sender = ResendNotificationSender::new(
            "re_test_key".to_string(),
            "noreply@taskline.example.com".to_string(),
        )
        .with_api_base("http://127.0.0.1:1");

        let err = sender.send_email(&make_email()).await.unwrap_err();

        assert!(matches!(err, NotificationError::SendFailed(_)));
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResendNotificationSender>();
    }

    #[test]
    fn 同じメッセージからは同一のリクエストボディが構築される() {
        let email = make_email();
        let build = |email: &EmailMessage| {
            serde_json::to_string(&SendEmailRequest {
                from:    "noreply@taskline.example.com",
                to:      [&email.to],
                subject: &email.subject,
                text:    &email.text_body,
                html:    &email.html_body,
            })
            .unwrap()
        };

        assert_eq!(build(&email), build(&email));
    }
}
