//! # インフラ層エラー
//!
//! ストレージ操作の失敗を [`InfraError`] ひとつで表す。
//!
//! 生成時に現在のスパン階層を [`SpanTrace`] として取り込むため、
//! API 層のログでは「どのリポジトリメソッドのどの ID で失敗したか」まで追える。
//! 種別で分岐したい場合は [`InfraError::kind`] を参照する。

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// ストレージ操作の失敗
#[derive(Debug, Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// [`InfraError`] の種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// SQLite ドライバが返したエラー（接続・SQL 実行・ファイル I/O）
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// ドライバ以外の要因による失敗
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Unexpected(msg.into()))
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// 生成時点のスパン階層
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(err: sqlx::Error) -> Self {
        Self::capture(InfraErrorKind::Database(err))
    }
}
