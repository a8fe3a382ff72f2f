//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 送信無効化時（API キー未設定・明示的な無効化）やテスト環境で使用する。

use async_trait::async_trait;
use taskline_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
///
/// プレーンテキスト本文も出力する。リンクやコードが本文に含まれるため、
/// 送信無効化時でも運用者が払い出されたトークンを確認できる。
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.text_body,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_emailがエラーを返さない() {
        let sender = NoopNotificationSender;
        let email = EmailMessage {
            to:        "test@example.com".to_string(),
            subject:   "Password Reset Request".to_string(),
            html_body: "<p>reset</p>".to_string(),
            text_body: "Your password reset link: http://localhost:3000/auth/reset-password?token=T1".to_string(),
        };

        let result = sender.send_email(&email).await;
        assert!(result.is_ok());
    }
}
