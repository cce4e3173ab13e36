//! # ヘルスチェックハンドラ
//!
//! アプリケーションの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! - `GET /health` - JSON でバージョンと稼働状態を返す
//! - `GET /api/` - 疎通確認用の固定テキストを返す
//!
//! データベースへの接続は確認せず、プロセス自体の起動状態のみを返す。

use axum::Json;
use roster_shared::HealthResponse;

/// `GET /api/` が返す固定テキスト
pub const WELCOME_MESSAGE: &str = "Welcome to the server...";

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// GET /api/
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}
