//! # Taskline ドメイン層
//!
//! 通知機能のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートはメール通知の「何を送るか」だけを表現し、
//! 「どう送るか」（Resend API、SMTP 等）には一切依存しない:
//!
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: EmailMessage）
//! - **通知イベント**: 業務イベントごとの通知種別と型付きパラメータ
//! - **ドメインエラー**: 通知送信の失敗を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → mailer → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（HTTP クライアント、SMTP）には依存しない。
//!
//! ## モジュール構成
//!
//! - [`notification`] - 通知イベント・メールメッセージ・通知エラーの定義

pub mod notification;

pub use notification::{AccountNotification, EmailMessage, NotificationError, NotificationKind};
