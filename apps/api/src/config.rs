//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。開発環境では `.env` ファイルを
//! `dotenvy` で読み込んでから [`ApiConfig::from_env`] を呼ぶ。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `ROSTER_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `ROSTER_PORT` | No | `8082` | ポート番号 |
//! | `DATABASE_URL` | No | `sqlite://storage/roster.db` | SQLite 接続 URL |
//! | `SHUTDOWN_GRACE_SECS` | No | `5` | シャットダウン時の猶予秒数 |
//!
//! ログ関連の `LOG_FORMAT` / `RUST_LOG` は `roster_shared::observability` が読む。

use std::{env, time::Duration};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8082;
const DEFAULT_DATABASE_URL: &str = "sqlite://storage/roster.db";
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 値が期待する形式でない
    #[error("{key} の値が不正です: {value:?}")]
    InvalidValue {
        key:   &'static str,
        value: String,
    },
}

/// API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:           String,
    /// ポート番号
    pub port:           u16,
    /// データベース接続 URL
    pub database_url:   String,
    /// シャットダウン時に処理中のリクエストを待つ時間
    pub shutdown_grace: Duration,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 未設定の変数はデフォルト値を使用する。
    /// 設定されているがパースできない値はエラーにする。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:           lookup("ROSTER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:           parse_or("ROSTER_PORT", lookup("ROSTER_PORT"), DEFAULT_PORT)?,
            database_url:   lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            shutdown_grace: Duration::from_secs(parse_or(
                "SHUTDOWN_GRACE_SECS",
                lookup("SHUTDOWN_GRACE_SECS"),
                DEFAULT_SHUTDOWN_GRACE_SECS,
            )?),
        })
    }

    /// `host:port` 形式のバインドアドレスを返す
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
