//! # Taskline メーラー層
//!
//! 業務イベント（サインアップ、パスワードリセット要求、招待、削除要求、
//! 購読）を 1 通の送信メールに変換するサービスを提供する。
//!
//! ## 設計方針
//!
//! - **構築時に送信手段を一度だけ選択**: 設定（API キーの有無、無効化フラグ、
//!   バックエンド指定）から `NotificationSender` 実装を選び、以降は不変
//! - **無効化モードは常に成功**: Noop 実装がログ出力のみ行い `Ok` を返す
//! - **エラーは呼び出し元に伝播**: リトライ・復旧は行わない。失敗は通知種別を
//!   含む [`MailError`] として一度だけ返す
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use taskline_mailer::{MailerConfig, MailerService};
//!
//! let config = MailerConfig::from_env();
//! let mailer = MailerService::from_config(&config)?;
//!
//! mailer.send_password_reset("user@example.com", "reset-token").await?;
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod template_renderer;

pub use config::{MailerConfig, build_sender};
pub use error::MailError;
pub use service::MailerService;
pub use template_renderer::TemplateRenderer;
