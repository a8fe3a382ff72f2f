//! # メーラーサービス
//!
//! テンプレートレンダリング → メール送信を統合するサービス。
//! 業務イベントごとの送信操作（5 種類）を公開する。
//!
//! ## 設計方針
//!
//! - **エラーは伝播**: 送信失敗は通知種別付きの [`MailError`] として
//!   呼び出し元に返す。リトライ・復旧は呼び出し元の判断
//! - **呼び出しごとに独立**: 各送信は単一の非同期処理で、共有する可変状態はない。
//!   並行呼び出しは安全で、順序保証はない
//! - **依存性注入**: `NotificationSender` は trait で抽象化し、構築時に注入する

use std::sync::Arc;

use taskline_domain::notification::AccountNotification;
use taskline_infra::notification::NotificationSender;
use taskline_shared::{event_log::event, log_business_event};

use crate::{
    MailError,
    TemplateRenderer,
    config::{MailerConfig, build_sender},
};

/// メーラーサービス
///
/// アカウント通知のメール送信フローを統合する。
/// 各操作は 1 通のメールを 1 名の受信者に送信する。
pub struct MailerService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    base_url:          String,
}

impl MailerService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        base_url: String,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            base_url,
        }
    }

    /// 設定からサービスを構築する
    ///
    /// 送信バックエンドの選択（Resend / SMTP / Noop）はここで一度だけ行う。
    /// 構築の失敗（SMTP 送信元アドレス不正、テンプレート不正）は
    /// 通知種別を持たないため、ドメインエラーのまま返す。
    pub fn from_config(
        config: &MailerConfig,
    ) -> Result<Self, taskline_domain::NotificationError> {
        let sender = build_sender(config)?;
        let template_renderer = TemplateRenderer::new()?;
        Ok(Self::new(sender, template_renderer, config.base_url.clone()))
    }

    /// パスワードリセットメールを送信する
    ///
    /// リセットリンクの有効期限（1 時間）は文面で伝えるのみで、
    /// 強制はトークン発行者の責務。
    pub async fn send_password_reset(
        &self,
        email: &str,
        reset_token: &str,
    ) -> Result<(), MailError> {
        self.dispatch(AccountNotification::PasswordReset {
            email:       email.to_string(),
            reset_token: reset_token.to_string(),
        })
        .await
    }

    /// アカウント削除確認メールを送信する（コードのみ、リンクなし）
    pub async fn send_delete_verification(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), MailError> {
        self.dispatch(AccountNotification::AccountDeletion {
            email: email.to_string(),
            code:  code.to_string(),
        })
        .await
    }

    /// メールアドレス確認メールを送信する
    pub async fn send_email_verification(
        &self,
        email: &str,
        verification_code: &str,
    ) -> Result<(), MailError> {
        self.dispatch(AccountNotification::EmailVerification {
            email: email.to_string(),
            code:  verification_code.to_string(),
        })
        .await
    }

    /// プロジェクト招待メールを送信する
    pub async fn send_project_invitation(
        &self,
        email: &str,
        token: &str,
        project_name: &str,
        inviter_name: &str,
    ) -> Result<(), MailError> {
        self.dispatch(AccountNotification::ProjectInvitation {
            email:        email.to_string(),
            token:        token.to_string(),
            project_name: project_name.to_string(),
            inviter_name: inviter_name.to_string(),
        })
        .await
    }

    /// サブスクリプション確認メールを送信する
    pub async fn send_subscription_confirmation(&self, email: &str) -> Result<(), MailError> {
        self.dispatch(AccountNotification::SubscriptionConfirmed {
            email: email.to_string(),
        })
        .await
    }

    /// 通知を送信する
    ///
    /// レンダリング → 送信の 2 段階。いずれの失敗も種別付きで返す。
    /// 成功・失敗どちらもビジネスイベントとしてログに残す。
    async fn dispatch(&self, notification: AccountNotification) -> Result<(), MailError> {
        let kind = notification.kind();
        let kind_str: &str = kind.into();
        let recipient = notification.recipient_email().to_string();

        let email = self
            .template_renderer
            .render(&notification, &self.base_url)
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    notification.kind = kind_str,
                    "通知テンプレートのレンダリングに失敗"
                );
                MailError::new(kind, e)
            })?;

        match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.kind = kind_str,
                    notification.recipient = %recipient,
                    "通知メール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.kind = kind_str,
                    notification.recipient = %recipient,
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(MailError::new(kind, e))
            }
        }
    }
}
