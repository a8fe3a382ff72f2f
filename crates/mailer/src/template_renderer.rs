//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **リンクはレンダラーが構築**: トークン・コードと `base_url` から
//!   固定パスのリンクを組み立てる
//! - **HTML は自動エスケープ**: tera は `.html` テンプレートを自動エスケープするため、
//!   呼び出し元から渡されるプロジェクト名・招待者名をそのまま HTML に展開しない。
//!   レンダラー自身が構築するリンク URL のみテンプレート側で `safe` を指定する

use taskline_domain::notification::{AccountNotification, EmailMessage, NotificationError};
use tera::{Context, Tera};

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`AccountNotification` から
/// `EmailMessage` を生成する。レンダリングは純粋で、同じ入力からは
/// 常に同一のメッセージが得られる。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "password_reset.html",
                    include_str!("../templates/notifications/password_reset.html"),
                ),
                (
                    "password_reset.txt",
                    include_str!("../templates/notifications/password_reset.txt"),
                ),
                (
                    "account_deletion.html",
                    include_str!("../templates/notifications/account_deletion.html"),
                ),
                (
                    "account_deletion.txt",
                    include_str!("../templates/notifications/account_deletion.txt"),
                ),
                (
                    "email_verification.html",
                    include_str!("../templates/notifications/email_verification.html"),
                ),
                (
                    "email_verification.txt",
                    include_str!("../templates/notifications/email_verification.txt"),
                ),
                (
                    "project_invitation.html",
                    include_str!("../templates/notifications/project_invitation.html"),
                ),
                (
                    "project_invitation.txt",
                    include_str!("../templates/notifications/project_invitation.txt"),
                ),
                (
                    "subscription_confirmed.html",
                    include_str!("../templates/notifications/subscription_confirmed.html"),
                ),
                (
                    "subscription_confirmed.txt",
                    include_str!("../templates/notifications/subscription_confirmed.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知イベントからメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `notification`: アカウント通知イベント
    /// - `base_url`: アプリケーションのベース URL（例: `http://localhost:3000`）
    pub fn render(
        &self,
        notification: &AccountNotification,
        base_url: &str,
    ) -> Result<EmailMessage, NotificationError> {
        let (template_name, subject, context) = build_template_params(notification, base_url);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: notification.recipient_email().to_string(),
            subject,
            html_body,
            text_body,
        })
    }
}

/// テンプレート名、件名、コンテキストを構築する
///
/// リンクの形式はフロントエンドのルーティングと合わせる:
///
/// - パスワードリセット: `{base_url}/auth/reset-password?token={token}`
/// - メール確認: `{base_url}/auth/verify-email?code={code}&email={URL エンコード済みアドレス}`
/// - 招待受諾: `{base_url}/invitations/accept?token={token}`
/// - サブスクリプション: `{base_url}` そのもの
fn build_template_params(
    notification: &AccountNotification,
    base_url: &str,
) -> (&'static str, String, Context) {
    let mut context = Context::new();

    match notification {
        AccountNotification::PasswordReset { reset_token, .. } => {
            let reset_url = format!("{base_url}/auth/reset-password?token={reset_token}");
            context.insert("reset_url", &reset_url);
            ("password_reset", "Password Reset Request".to_string(), context)
        }
        AccountNotification::AccountDeletion { code, .. } => {
            context.insert("code", code);
            (
                "account_deletion",
                "Account Deletion Verification".to_string(),
                context,
            )
        }
        AccountNotification::EmailVerification { email, code } => {
            let verification_url = format!(
                "{base_url}/auth/verify-email?code={code}&email={}",
                urlencoding::encode(email)
            );
            context.insert("verification_url", &verification_url);
            (
                "email_verification",
                "Email Verification".to_string(),
                context,
            )
        }
        AccountNotification::ProjectInvitation {
            token,
            project_name,
            inviter_name,
            ..
        } => {
            let invitation_url = format!("{base_url}/invitations/accept?token={token}");
            context.insert("invitation_url", &invitation_url);
            context.insert("project_name", project_name);
            context.insert("inviter_name", inviter_name);
            (
                "project_invitation",
                format!("Invitation to join the \"{project_name}\" project"),
                context,
            )
        }
        AccountNotification::SubscriptionConfirmed { .. } => {
            context.insert("app_url", base_url);
            (
                "subscription_confirmed",
                "Subscription to Taskline".to_string(),
                context,
            )
        }
    }
}
