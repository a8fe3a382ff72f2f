//! # データベースセットアップ
//!
//! マネージド PostgreSQL（Neon 等）への接続を検証するセットアップツール。
//!
//! ## 役割
//!
//! デプロイ前・開発環境構築時に一度だけ実行し、以下を確認する:
//!
//! - **接続 URL の正規化**: `sslmode=require` がなければ補完する
//! - **接続プールの確立**: 最小接続数まで確保できること
//! - **疎通確認**: 認証とクエリ実行が通ること
//!
//! スキーマ・マイグレーション・シードデータは外部のマイグレーションツールが
//! 所有するため、このツールは接続の検証のみを行う。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 実行方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p taskline-setup
//! ```
//!
//! 接続に失敗した場合は非ゼロで終了する。

use anyhow::Context as _;
use taskline_infra::db;
use taskline_shared::{
    event_log::event,
    log_business_event,
    observability::{TracingConfig, init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("setup"));

    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL が設定されていません（.env を確認してください）")?;
    let database_url = db::ensure_sslmode(&database_url);

    tracing::info!("データベースに接続します");
    let pool = db::create_pool(&database_url)
        .await
        .context("データベース接続に失敗しました")?;

    db::verify_connectivity(&pool)
        .await
        .context("疎通確認クエリに失敗しました")?;

    let version = db::server_version(&pool)
        .await
        .context("サーバーバージョンの取得に失敗しました")?;

    log_business_event!(
        event.category = event::category::SETUP,
        event.action = event::action::DATABASE_VERIFIED,
        event.result = event::result::SUCCESS,
        server_version = %version,
        "データベースの疎通確認が完了しました"
    );

    Ok(())
}
