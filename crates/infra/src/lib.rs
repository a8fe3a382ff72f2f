//! # Taskline インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはドメイン層で定義された通知モデルに対する具体的な
//! 送信手段を提供する。外部システムの詳細をカプセル化し、ドメイン層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **メール送信**: Resend API / SMTP / Noop の送信実装
//! - **データベース接続**: PostgreSQL への接続プール管理（セットアップ用）
//!
//! ## 依存関係
//!
//! ```text
//! apps → mailer → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`notification`] - メール送信実装（Resend / SMTP / Noop）

pub mod db;
pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use notification::{
    NoopNotificationSender,
    NotificationSender,
    ResendNotificationSender,
    SmtpNotificationSender,
};
