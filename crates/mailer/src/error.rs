//! # メーラー層エラー定義
//!
//! 送信失敗を通知種別付きで呼び出し元に返すためのエラー型。
//!
//! ## 設計方針
//!
//! - **種別プレフィックス**: どの通知の送信が失敗したかをメッセージに含める
//! - **単一の失敗型**: API 報告エラーもトランスポートエラーも、
//!   呼び出し元には同じ形（種別 + 元メッセージ）で正規化して返す
//! - **リトライしない**: 失敗は一度だけ呼び出し元に返し、以降の判断は委ねる

use taskline_domain::notification::{NotificationError, NotificationKind};
use thiserror::Error;

/// メール送信の失敗
///
/// 表示は `{通知種別} メールの送信に失敗: {元のメッセージ}` の形式。
/// 元のメッセージは API が報告したもの、捕捉した例外のもの、
/// または `"Unknown error"`（何も得られなかった場合）。
#[derive(Debug, Error)]
#[error("{kind} メールの送信に失敗: {message}")]
pub struct MailError {
    kind:    NotificationKind,
    message: String,
}

impl MailError {
    /// 通知エラーを種別付きで包む
    ///
    /// `NotificationError` の外側の定型句ではなく、内側のメッセージだけを
    /// 取り出して保持する（二重のプレフィックスを避ける）。
    pub fn new(kind: NotificationKind, source: NotificationError) -> Self {
        let message = match source {
            NotificationError::ApiError(m)
            | NotificationError::SendFailed(m)
            | NotificationError::TemplateFailed(m) => m,
        };
        Self { kind, message }
    }

    /// 失敗した通知の種別
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// 元のエラーメッセージ
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn 表示に種別と元メッセージが含まれる() {
        let err = MailError::new(
            NotificationKind::PasswordReset,
            NotificationError::ApiError("boom".to_string()),
        );

        assert_eq!(
            err.to_string(),
            "password_reset メールの送信に失敗: boom"
        );
    }

    #[test]
    fn トランスポートエラーも同じ形に正規化される() {
        let err = MailError::new(
            NotificationKind::ProjectInvitation,
            NotificationError::SendFailed("connection refused".to_string()),
        );

        assert_eq!(err.kind(), NotificationKind::ProjectInvitation);
        assert_eq!(err.message(), "connection refused");
    }
}
