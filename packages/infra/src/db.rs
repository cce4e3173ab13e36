//! # SQLite データベース接続管理
//!
//! データベース接続プールの作成と管理を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 毎回ファイルを開き直すオーバーヘッドを避け、接続を再利用
//! - **ファイル自動作成**: データベースファイルが存在しない場合は作成する
//! - **スキーマは起動時に保証**: マイグレーション基盤を持たず、
//!   `CREATE TABLE IF NOT EXISTS` で冪等に作成する
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use roster_infra::db;
//!
//! async fn example() -> Result<(), sqlx::Error> {
//!     let pool = db::create_pool("sqlite://storage/roster.db").await?;
//!
//!     let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
//!         .fetch_one(&pool)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// 最大接続数
const MAX_CONNECTIONS: u32 = 5;

/// `SqlitePoolOptions` の共通設定を返す
///
/// テストではインメモリ DB を 1 接続で共有するため、
/// `max_connections(1)` と組み合わせて使用する。
pub fn pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5))
}

/// SQLite 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを
/// アプリケーション全体で共有する。
///
/// # 引数
///
/// * `database_url` - SQLite 接続 URL
///   - 形式: `sqlite://path/to/file.db` または `sqlite::memory:`
///
/// ファイルパスの親ディレクトリが存在しない場合は作成する。
///
/// # エラー
///
/// URL が不正な場合、またはファイルを開けない場合に `sqlx::Error` を返す。
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    if let Some(parent) = options.get_filename().parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    pool_options()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_インメモリdbに接続できる() {
        let pool = create_pool("sqlite::memory:").await.unwrap();

        let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();

        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn test_存在しないディレクトリのファイルdbを作成できる() {
        let root = std::env::temp_dir().join(format!("roster-db-test-{}", std::process::id()));
        let path = root.join("nested").join("roster.db");

        let pool = create_pool(&format!("sqlite://{}", path.display()))
            .await
            .unwrap();
        pool.close().await;

        assert!(path.exists());
        std::fs::remove_dir_all(&root).unwrap();
    }
}
