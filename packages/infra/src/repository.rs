//! # リポジトリ実装
//!
//! ドメインエンティティの永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **トレイトで境界を切る**: ユースケースは `dyn StudentRepository` に依存し、
//!   SQLite の詳細を知らない
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod student_repository;

pub use student_repository::{SqliteStudentRepository, StudentRepository};
