//! # API エラー定義
//!
//! ハンドラ・ユースケースで発生するエラーと、レスポンスエンベロープへの変換を定義する。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError (検証失敗) ─┐
//! InfraError (ストレージ) ─┼→ ApiError ─IntoResponse→ StatusCode + ApiResponse
//! デコード・ID パース失敗 ─┘
//! ```
//!
//! ## マッピング
//!
//! | ApiError | HTTP Status | `message` |
//! |----------|-------------|-----------|
//! | `EmptyBody` | 400 | `empty body` |
//! | `MalformedBody` | 400 | `Bad Request` |
//! | `InvalidId` | 400 | `Invalid student ID` |
//! | `Validation` | 400 | `Validation failed` |
//! | `NotFound` | 404 | `Student not found` |
//! | `Storage` | 500 | 失敗した操作（例: `Failed to retrieve student`） |
//!
//! ストレージエラーの詳細はログにのみ出力し、クライアントには
//! `internal storage error` だけを返す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_domain::{DomainError, student::StudentId};
use roster_infra::InfraError;
use roster_shared::ApiResponse;
use thiserror::Error;

/// クライアントに返すストレージエラーの説明
pub const STORAGE_ERROR_DETAIL: &str = "internal storage error";

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストボディが空
    #[error("request body is empty")]
    EmptyBody,

    /// リクエストボディが JSON として解釈できない
    #[error("{0}")]
    MalformedBody(String),

    /// パスの ID が整数でない
    #[error("{0}")]
    InvalidId(String),

    /// 入力検証の失敗
    #[error("{0}")]
    Validation(String),

    /// 学生が存在しない
    #[error("no student found with id {0}")]
    NotFound(StudentId),

    /// ストレージの操作失敗
    ///
    /// `action` は失敗した操作の要約で、レスポンスの `message` になる。
    #[error("{action}: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: InfraError,
    },
}

impl ApiError {
    /// `map_err` に渡すための、ストレージエラーへの変換関数を返す
    ///
    /// ```rust,ignore
    /// repo.count().await.map_err(ApiError::storage("Failed to count students"))?;
    /// ```
    pub fn storage(action: &'static str) -> impl FnOnce(InfraError) -> Self {
        move |source| Self::Storage { action, source }
    }

    /// HTTP ステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyBody | Self::MalformedBody(_) | Self::InvalidId(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// エンベロープの `message` に載せる操作の要約
    fn summary(&self) -> &'static str {
        match self {
            Self::EmptyBody => "empty body",
            Self::MalformedBody(_) => "Bad Request",
            Self::InvalidId(_) => "Invalid student ID",
            Self::Validation(_) => "Validation failed",
            Self::NotFound(_) => "Student not found",
            Self::Storage { action, .. } => *action,
        }
    }

    /// エンベロープの `error` に載せる原因の説明
    fn detail(&self) -> String {
        match self {
            Self::Storage { .. } => STORAGE_ERROR_DETAIL.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Storage { action, source } => {
                tracing::error!(
                    error = %source,
                    span_trace = %source.span_trace(),
                    "{action}"
                );
            }
            other => tracing::debug!(error = %other, "リクエストを拒否しました"),
        }

        let body = ApiResponse::failure(status.as_u16(), self.summary(), self.detail());
        (status, Json(body)).into_response()
    }
}
