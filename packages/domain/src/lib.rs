//! # Roster ドメイン層
//!
//! 学生名簿のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 永続化後に ID を持つ [`student::Student`]
//! - **値オブジェクト**: 検証済みの属性 [`student::StudentProfile`]
//! - **ドメインエラー**: 入力検証の失敗を表現する [`DomainError`]
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘           ↗
//!      shared
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use roster_domain::student::StudentDraft;
//!
//! let draft = StudentDraft {
//!     name:  Some("Ann".to_string()),
//!     email: Some("ann@x.com".to_string()),
//!     age:   Some(20),
//! };
//! let profile = draft.into_profile()?;
//! assert_eq!(profile.name(), "Ann");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod student;

pub use error::DomainError;
