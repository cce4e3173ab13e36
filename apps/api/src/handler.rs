//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、判断はユースケースに委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs   # ヘルスチェック・疎通確認
//!     └── student.rs  # 学生 CRUD
//! ```

pub mod health;
pub mod student;

pub use health::{health_check, welcome};
pub use student::{
    StudentState,
    create_student,
    delete_student,
    get_student,
    list_students,
    update_student,
};
