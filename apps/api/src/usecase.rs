//! # ユースケース層
//!
//! 学生名簿のアプリケーションロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入出力の変換に専念し、判断はユースケースに集約

pub mod student;

pub use student::StudentUseCaseImpl;
