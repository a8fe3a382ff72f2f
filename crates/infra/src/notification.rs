//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: Resend（ホスト型 API、本番用）、SMTP（Mailpit 開発用）、
//!   Noop（送信無効化時・テスト用）
//! - **構築時切替**: メーラー層がコンフィグに基づき実装を一度だけ選択する

mod noop;
mod resend;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
pub use resend::ResendNotificationSender;
pub use smtp::SmtpNotificationSender;
use taskline_domain::notification::{EmailMessage, NotificationError};

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
/// Resend / SMTP / Noop の 3 実装を設定で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    ///
    /// 受信者は常に 1 名（`email.to`）。部分的成功は存在しない。
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
