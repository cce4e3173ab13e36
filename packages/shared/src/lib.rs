//! # Roster 共有ユーティリティ
//!
//! ドメインを持たない共通部品を提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存できる
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は api クレートの責務）

pub mod api_response;
pub mod health;
pub mod observability;
pub mod pagination;

pub use api_response::{ApiResponse, ResponseStatus};
pub use health::HealthResponse;
pub use pagination::{Pagination, PaginationMeta};
