//! # テスト用モック送信実装
//!
//! メーラー層のテストで使用するインメモリのメール送信モック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! taskline-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use taskline_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

/// モックに注入する失敗の種別
///
/// `NotificationError` は `Clone` を実装しないため、
/// 送信のたびにここからエラーを再構築する。
#[derive(Debug, Clone)]
enum MockFailure {
    /// API がエラーペイロードを返したことにする
    Api(String),
    /// 呼び出し自体が失敗したことにする
    Transport(String),
}

/// メール送信モック
///
/// 送信されたメッセージを記録する。`fail_with_*` で失敗を注入すると、
/// 以降の `send_email` は記録せずにエラーを返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failure: Arc<Mutex<Option<MockFailure>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の送信を API 報告エラーで失敗させる
    pub fn fail_with_api_error(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(MockFailure::Api(message.into()));
    }

    /// 以降の送信をトランスポートエラーで失敗させる
    pub fn fail_with_transport_error(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(MockFailure::Transport(message.into()));
    }

    /// これまでに送信されたメッセージ
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if let Some(failure) = self.failure.lock().unwrap().clone() {
            return Err(match failure {
                MockFailure::Api(msg) => NotificationError::ApiError(msg),
                MockFailure::Transport(msg) => NotificationError::SendFailed(msg),
            });
        }

        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_email() -> EmailMessage {
        EmailMessage {
            to:        "a@b.com".to_string(),
            subject:   "Email Verification".to_string(),
            html_body: "<p>verify</p>".to_string(),
            text_body: "verify".to_string(),
        }
    }

    #[tokio::test]
    async fn 送信したメッセージが記録される() {
        let sender = MockNotificationSender::new();

        sender.send_email(&make_email()).await.unwrap();

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
    }

    #[tokio::test]
    async fn 注入した失敗が再現される() {
        let sender = MockNotificationSender::new();
        sender.fail_with_api_error("boom");

        let err = sender.send_email(&make_email()).await.unwrap_err();

        assert!(matches!(err, NotificationError::ApiError(_)));
        assert!(sender.sent_emails().is_empty());
    }
}
