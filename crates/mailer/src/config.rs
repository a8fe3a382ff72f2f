//! # メーラー設定
//!
//! 環境変数からメール送信の設定を読み込み、送信バックエンドを選択する。
//!
//! ## 設計方針
//!
//! - **起動時に一度だけ読み込む**: 設定はプロセス起動時に構築され、以降は不変
//! - **環境変数を直接読まない送信処理**: テストでは環境変数を変更せず、
//!   構築済みの `MailerConfig` を注入する
//! - **API キー欠如は無効化**: Resend バックエンドでキーが未設定なら、
//!   明示的な無効化と同様に Noop へフォールバックする

use std::{env, sync::Arc};

use taskline_domain::notification::NotificationError;
use taskline_infra::{
    NoopNotificationSender,
    NotificationSender,
    ResendNotificationSender,
    SmtpNotificationSender,
};

/// メール送信の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `resend`: Resend API 経由で送信（本番、デフォルト）
/// - `smtp`: Mailpit（開発）/ SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Resend API キー（backend=resend の場合に使用。未設定なら無効化）
    pub api_key:      Option<String>,
    /// 送信無効化フラグ（true なら常に Noop）
    pub disabled:     bool,
    /// 送信バックエンド（"resend" | "smtp" | "noop"）
    pub backend:      String,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス
    pub from_address: String,
    /// アプリケーションのベース URL（メール内リンク用）
    pub base_url:     String,
}

impl MailerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// | 変数名 | 必須 | 説明 |
    /// |--------|------|------|
    /// | `RESEND_API_KEY` | No | Resend の API キー。未設定なら送信無効化 |
    /// | `DISABLE_EMAIL` | No | `true` で送信を明示的に無効化 |
    /// | `NOTIFICATION_BACKEND` | No | `resend`（デフォルト）/ `smtp` / `noop` |
    /// | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
    /// | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
    /// | `MAIL_FROM_ADDRESS` | No | 送信元アドレス |
    /// | `BASE_URL` | No | リンク用ベース URL（デフォルト: `http://localhost:3000`） |
    pub fn from_env() -> Self {
        let api_key = env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty());
        let backend = env::var("NOTIFICATION_BACKEND").unwrap_or_else(|_| "resend".to_string());
        let disable_flag = env::var("DISABLE_EMAIL").is_ok_and(|v| v == "true");
        let disabled = resolve_disabled(&backend, api_key.as_deref(), disable_flag);

        Self {
            api_key,
            disabled,
            backend,
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "1025".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            from_address: env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "Taskline <noreply@taskline.example.com>".to_string()),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

/// 送信無効化の判定
///
/// 明示的な無効化フラグ、または Resend バックエンドで API キーが
/// 未設定の場合に無効化する。
fn resolve_disabled(backend: &str, api_key: Option<&str>, disable_flag: bool) -> bool {
    disable_flag || (backend == "resend" && api_key.is_none())
}

/// 設定に基づいて送信実装を選択する
///
/// 無効化時は常に Noop。それ以外はバックエンド指定に従う。
/// 選択は構築時に一度だけ行い、送信のたびに分岐しない。
pub fn build_sender(config: &MailerConfig) -> Result<Arc<dyn NotificationSender>, NotificationError> {
    if config.disabled {
        tracing::info!("メール送信は無効化されています（Noop 送信を使用）");
        return Ok(Arc::new(NoopNotificationSender));
    }

    match config.backend.as_str() {
        "noop" => Ok(Arc::new(NoopNotificationSender)),
        "smtp" => Ok(Arc::new(SmtpNotificationSender::new(
            &config.smtp_host,
            config.smtp_port,
            &config.from_address,
        )?)),
        "resend" => match &config.api_key {
            Some(api_key) => Ok(Arc::new(ResendNotificationSender::new(
                api_key.clone(),
                config.from_address.clone(),
            ))),
            // resolve_disabled で弾かれるため通常は到達しない
            None => {
                tracing::warn!("RESEND_API_KEY が未設定のため Noop 送信にフォールバック");
                Ok(Arc::new(NoopNotificationSender))
            }
        },
        other => {
            tracing::warn!(backend = other, "不明なバックエンド指定のため Noop 送信にフォールバック");
            Ok(Arc::new(NoopNotificationSender))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn make_config(backend: &str, api_key: Option<&str>, disabled: bool) -> MailerConfig {
        MailerConfig {
            api_key:      api_key.map(str::to_string),
            disabled,
            backend:      backend.to_string(),
            smtp_host:    "localhost".to_string(),
            smtp_port:    1025,
            from_address: "Taskline <noreply@taskline.example.com>".to_string(),
            base_url:     "http://localhost:3000".to_string(),
        }
    }

    #[rstest]
    // 明示的な無効化フラグは常に優先される
    #[case("resend", Some("re_key"), true, true)]
    #[case("smtp", None, true, true)]
    // Resend でキーなしは無効化
    #[case("resend", None, false, true)]
    // Resend でキーありは有効
    #[case("resend", Some("re_key"), false, false)]
    // SMTP / Noop はキー不要
    #[case("smtp", None, false, false)]
    #[case("noop", None, false, false)]
    fn resolve_disabledの判定が正しい(
        #[case] backend: &str,
        #[case] api_key: Option<&str>,
        #[case] disable_flag: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(resolve_disabled(backend, api_key, disable_flag), expected);
    }

    #[test]
    fn 無効化時はnoop送信が選択される() {
        let config = make_config("resend", Some("re_key"), true);
        // ビルドが成功することのみ検証（trait object のため型は確認できない）
        assert!(build_sender(&config).is_ok());
    }

    #[test]
    fn 不明なバックエンドでもエラーにならない() {
        let config = make_config("carrier-pigeon", None, false);
        assert!(build_sender(&config).is_ok());
    }
}
