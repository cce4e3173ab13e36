//! # ルーター構築
//!
//! エンドポイントとミドルウェアを 1 つの [`Router`] にまとめる。
//! `main` と統合テストの両方がこの関数を使う。

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_shared::observability::make_request_span;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    StudentState,
    create_student,
    delete_student,
    get_student,
    health_check,
    list_students,
    update_student,
    welcome,
};

/// アプリケーション全体のルーターを構築する
pub fn build_router(state: Arc<StudentState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/", get(welcome))
        .route("/api/students", get(list_students).post(create_student))
        .route(
            "/api/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(state)
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: クライアント提供値がなければ UUID を生成
        // 2. TraceLayer: リクエストスパンに request_id を含める
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
