//! # Roster インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその SQLite 実装を提供する。
//! ストレージの詳細をカプセル化し、ユースケース層をインフラの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!   ↘           ↗
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - SQLite データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use roster_infra::{db, repository::SqliteStudentRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("sqlite://storage/roster.db").await?;
//!     let repo = SqliteStudentRepository::init(pool).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::InfraError;
