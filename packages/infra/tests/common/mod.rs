//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するプール生成・エンティティ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use roster_domain::student::{StudentDraft, StudentProfile};
use roster_infra::{db, repository::SqliteStudentRepository};
use sqlx::SqlitePool;

/// テストごとに独立したインメモリ DB のプールを作成する
///
/// 接続を 1 本に絞り、全クエリが同じ DB を参照するようにする。
pub async fn memory_pool() -> SqlitePool {
    db::pool_options()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

/// テーブル作成済みのリポジトリを返す
pub async fn setup_repository() -> SqliteStudentRepository {
    SqliteStudentRepository::init(memory_pool().await)
        .await
        .unwrap()
}

/// 検証済みのプロフィールを作成する
pub fn profile(name: &str, email: &str, age: i32) -> StudentProfile {
    StudentDraft {
        name:  Some(name.to_string()),
        email: Some(email.to_string()),
        age:   Some(age),
    }
    .into_profile()
    .unwrap()
}

/// `student{n}@example.com` 形式のプロフィールを作成する
pub fn numbered_profile(n: usize) -> StudentProfile {
    profile(&format!("Student {n}"), &format!("student{n}@example.com"), 18)
}
