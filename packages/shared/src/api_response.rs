//! # API レスポンスエンベロープ
//!
//! 全エンドポイントで共通のレスポンス形式を提供する。
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "status": "OK",
//!   "code": 200,
//!   "message": "Students retrieved successfully",
//!   "data": [...],
//!   "meta": { "page": 1, "limit": 10, "total": 15 }
//! }
//! ```
//!
//! 値のない `message` / `data` / `meta` / `error` は `null` ではなくキーごと省略する。

use serde::{Deserialize, Serialize};

/// エンベロープの `status` フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// 統一レスポンス型
///
/// - `T`: `data` に載せるペイロード
/// - `M`: `meta` に載せる付帯情報（一覧 API のページネーション情報など）
///
/// ## 使用例
///
/// ```
/// use roster_shared::{ApiResponse, ResponseStatus};
///
/// let response = ApiResponse::success(200, "Student retrieved successfully", "Ann");
/// assert_eq!(response.status, ResponseStatus::Ok);
/// assert_eq!(response.data, Some("Ann"));
///
/// let failure = ApiResponse::failure(400, "Invalid student ID", "abc is not an integer");
/// assert_eq!(failure.status, ResponseStatus::Error);
/// assert!(failure.data.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T, M = ()> {
    pub status:  ResponseStatus,
    pub code:    u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data:    Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta:    Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>,
}

impl<T> ApiResponse<T> {
    /// 成功レスポンスを作成する
    pub fn success(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status:  ResponseStatus::Ok,
            code,
            message: Some(message.into()),
            data:    Some(data),
            meta:    None,
            error:   None,
        }
    }
}

impl<T, M> ApiResponse<T, M> {
    /// `meta` を付与したレスポンスに変換する
    pub fn with_meta<N>(self, meta: N) -> ApiResponse<T, N> {
        ApiResponse {
            status:  self.status,
            code:    self.code,
            message: self.message,
            data:    self.data,
            meta:    Some(meta),
            error:   self.error,
        }
    }
}

impl ApiResponse<()> {
    /// エラーレスポンスを作成する
    ///
    /// `message` は失敗した操作の要約、`error` は原因の説明。
    pub fn failure(code: u16, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status:  ResponseStatus::Error,
            code,
            message: Some(message.into()),
            data:    None,
            meta:    None,
            error:   Some(error.into()),
        }
    }
}
