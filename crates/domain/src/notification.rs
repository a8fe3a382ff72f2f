//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`AccountNotification`] | アカウント通知イベント | 5 種類: パスワードリセット、削除確認、メール確認、プロジェクト招待、サブスクリプション確認 |
//! | [`NotificationKind`] | 通知種別 | ログ・エラーメッセージで通知を識別する snake_case 文字列 |
//! | [`EmailMessage`] | メールメッセージ | 送信 1 回ごとに構築される一時的な値。送信後は保持しない |
//!
//! ## 設計方針
//!
//! - **enum による通知イベント**: 各バリアントが業務イベントに対応し、
//!   型付きパラメータ（トークン、コード、プロジェクト名等）を保持する
//! - **構築の冪等性**: 同じ引数からは常に等価なメッセージが構築される
//! - **送信手段からの独立**: レンダリングと送信はインフラ層・メーラー層の責務

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

/// 通知送信エラー
///
/// メール API がエラーペイロードを返した場合（[`ApiError`](NotificationError::ApiError)）と、
/// 呼び出し自体が完了しなかった場合（[`SendFailed`](NotificationError::SendFailed)）を区別する。
/// どちらも内部でリトライせず、呼び出し元にそのまま伝播する。
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール API は応答したが、エラーペイロードを返した
    #[error("メール API がエラーを返却: {0}")]
    ApiError(String),

    /// メール送信の呼び出し自体に失敗（ネットワークエラー等）
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知種別
///
/// ログ出力とエラーメッセージで通知を識別する。
/// snake_case でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// パスワードリセット: リセット要求時 → 要求者に送信
    PasswordReset,
    /// アカウント削除確認: 削除要求時 → 本人に確認コードを送信
    AccountDeletion,
    /// メールアドレス確認: サインアップ時 → 登録アドレスに送信
    EmailVerification,
    /// プロジェクト招待: メンバー招待時 → 招待されたアドレスに送信
    ProjectInvitation,
    /// サブスクリプション確認: 購読完了時 → 購読者に送信
    SubscriptionConfirmed,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
/// 送信 1 回ごとに構築され、送信後は保持されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// アカウント通知イベント
///
/// 各バリアントが業務イベント（5 種類）に対応する。
/// トークン・コードは呼び出し元（発行者）が供給し、有効期限の強制も
/// 発行者の責務。本モジュールは文面で期限を伝えるのみ。
#[derive(Debug, Clone)]
pub enum AccountNotification {
    /// パスワードリセット: リセットリンク（トークン付き）を送信
    PasswordReset {
        email:       String,
        reset_token: String,
    },
    /// アカウント削除確認: 確認コードを本文に直接埋め込む（リンクなし）
    AccountDeletion { email: String, code: String },
    /// メールアドレス確認: コードと URL エンコード済みアドレスを持つリンクを送信
    EmailVerification { email: String, code: String },
    /// プロジェクト招待: 招待受諾リンクを送信。プロジェクト名・招待者名を文面に含む
    ProjectInvitation {
        email:        String,
        token:        String,
        project_name: String,
        inviter_name: String,
    },
    /// サブスクリプション確認: アプリケーショントップへのリンクを送信
    SubscriptionConfirmed { email: String },
}

impl AccountNotification {
    /// 通知種別を返す
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::PasswordReset { .. } => NotificationKind::PasswordReset,
            Self::AccountDeletion { .. } => NotificationKind::AccountDeletion,
            Self::EmailVerification { .. } => NotificationKind::EmailVerification,
            Self::ProjectInvitation { .. } => NotificationKind::ProjectInvitation,
            Self::SubscriptionConfirmed { .. } => NotificationKind::SubscriptionConfirmed,
        }
    }

    /// 受信者のメールアドレスを返す
    ///
    /// どのバリアントも受信者は常に 1 名。
    pub fn recipient_email(&self) -> &str {
        match self {
            Self::PasswordReset { email, .. }
            | Self::AccountDeletion { email, .. }
            | Self::EmailVerification { email, .. }
            | Self::ProjectInvitation { email, .. }
            | Self::SubscriptionConfirmed { email } => email,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(NotificationKind::PasswordReset, "password_reset")]
    #[case(NotificationKind::AccountDeletion, "account_deletion")]
    #[case(NotificationKind::EmailVerification, "email_verification")]
    #[case(NotificationKind::ProjectInvitation, "project_invitation")]
    #[case(NotificationKind::SubscriptionConfirmed, "subscription_confirmed")]
    fn notification_kind_の文字列変換が正しい(
        #[case] kind: NotificationKind,
        #[case] expected: &str,
    ) {
        // Display (snake_case)
        assert_eq!(kind.to_string(), expected);
        // FromStr (snake_case)
        assert_eq!(NotificationKind::from_str(expected).unwrap(), kind);
    }

    fn make_password_reset() -> AccountNotification {
        AccountNotification::PasswordReset {
            email:       "a@b.com".to_string(),
            reset_token: "T1".to_string(),
        }
    }

    fn make_invitation() -> AccountNotification {
        AccountNotification::ProjectInvitation {
            email:        "member@example.com".to_string(),
            token:        "inv-token".to_string(),
            project_name: "Website Redesign".to_string(),
            inviter_name: "Alice".to_string(),
        }
    }

    #[test]
    fn kindが各バリアントで正しい値を返す() {
        assert_eq!(
            make_password_reset().kind(),
            NotificationKind::PasswordReset
        );
        assert_eq!(
            AccountNotification::AccountDeletion {
                email: "a@b.com".to_string(),
                code:  "123456".to_string(),
            }
            .kind(),
            NotificationKind::AccountDeletion
        );
        assert_eq!(
            AccountNotification::EmailVerification {
                email: "a@b.com".to_string(),
                code:  "C1".to_string(),
            }
            .kind(),
            NotificationKind::EmailVerification
        );
        assert_eq!(make_invitation().kind(), NotificationKind::ProjectInvitation);
        assert_eq!(
            AccountNotification::SubscriptionConfirmed {
                email: "a@b.com".to_string(),
            }
            .kind(),
            NotificationKind::SubscriptionConfirmed
        );
    }

    #[test]
    fn recipient_emailが各バリアントで正しいメールアドレスを返す() {
        assert_eq!(make_password_reset().recipient_email(), "a@b.com");
        assert_eq!(make_invitation().recipient_email(), "member@example.com");
    }

    #[test]
    fn 同じ引数からの構築は等価になる() {
        let a = make_password_reset();
        let b = make_password_reset();
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.recipient_email(), b.recipient_email());
    }
}
