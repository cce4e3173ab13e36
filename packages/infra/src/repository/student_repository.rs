//! # StudentRepository
//!
//! 学生の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **採番はストレージに任せる**: `INTEGER PRIMARY KEY AUTOINCREMENT` が ID を決める
//! - **安定した並び順**: 一覧は常に `id` 昇順で返し、ページ境界をまたいで重複しない
//! - **影響行数を返す**: 更新・削除は対象が存在しなくてもエラーにせず、
//!   影響行数で呼び出し元に判断を委ねる

use async_trait::async_trait;
use roster_domain::student::{Student, StudentId, StudentProfile};
use sqlx::SqlitePool;

use crate::error::InfraError;

/// `students` テーブルの定義
const CREATE_STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT    NOT NULL,
        email TEXT    NOT NULL,
        age   INTEGER NOT NULL
    )
"#;

/// 学生リポジトリトレイト
///
/// 学生の CRUD 操作を定義する。
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// 学生を挿入し、採番された ID を返す
    async fn create(&self, profile: &StudentProfile) -> Result<StudentId, InfraError>;

    /// ID で学生を検索する
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, InfraError>;

    /// ID 昇順で `offset` 件読み飛ばし、最大 `limit` 件を取得する
    async fn list(&self, limit: u32, offset: u64) -> Result<Vec<Student>, InfraError>;

    /// 全学生数を返す
    async fn count(&self) -> Result<i64, InfraError>;

    /// 学生の属性を上書きし、影響行数を返す
    async fn update_by_id(&self, id: StudentId, profile: &StudentProfile)
    -> Result<u64, InfraError>;

    /// 学生を削除し、影響行数を返す
    async fn delete_by_id(&self, id: StudentId) -> Result<u64, InfraError>;
}

/// `students` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id:    i64,
    name:  String,
    email: String,
    age:   i32,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student::from_db(StudentId::from_i64(row.id), row.name, row.email, row.age)
    }
}

/// SQLite 実装の StudentRepository
#[derive(Debug, Clone)]
pub struct SqliteStudentRepository {
    pool: SqlitePool,
}

impl SqliteStudentRepository {
    /// テーブルの存在を保証したうえでリポジトリを作成する
    ///
    /// 既にテーブルがある場合は何もしない（既存データは保持される）。
    pub async fn init(pool: SqlitePool) -> Result<Self, InfraError> {
        sqlx::query(CREATE_STUDENTS_TABLE).execute(&pool).await?;
        tracing::debug!("students テーブルを確認しました");
        Ok(Self { pool })
    }
}

#[async_trait]
impl StudentRepository for SqliteStudentRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, profile: &StudentProfile) -> Result<StudentId, InfraError> {
        let result = sqlx::query("INSERT INTO students (name, email, age) VALUES (?, ?, ?)")
            .bind(profile.name())
            .bind(profile.email())
            .bind(profile.age())
            .execute(&self.pool)
            .await?;

        Ok(StudentId::from_i64(result.last_insert_rowid()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, InfraError> {
        let row = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, email, age FROM students WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Student::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%limit, %offset))]
    async fn list(&self, limit: u32, offset: u64) -> Result<Vec<Student>, InfraError> {
        // SQLite の OFFSET は符号付き 64bit
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, name, email, age
            FROM students
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn count(&self) -> Result<i64, InfraError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_by_id(
        &self,
        id: StudentId,
        profile: &StudentProfile,
    ) -> Result<u64, InfraError> {
        let result = sqlx::query("UPDATE students SET name = ?, email = ?, age = ? WHERE id = ?")
            .bind(profile.name())
            .bind(profile.email())
            .bind(profile.age())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete_by_id(&self, id: StudentId) -> Result<u64, InfraError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
