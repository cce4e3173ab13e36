//! # Roster API サーバー
//!
//! 学生名簿を管理する JSON over HTTP の CRUD サービス。
//!
//! ## アーキテクチャ
//!
//! ```text
//! HTTP ─▶ handler ─▶ usecase ─▶ StudentRepository (trait)
//!            │                        │
//!            ▼                        ▼
//!       ApiResponse            SqliteStudentRepository
//! ```
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーターとミドルウェアの構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義とエンベロープへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - アプリケーションロジック

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
