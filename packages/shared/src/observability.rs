//! # ログ・トレーシング
//!
//! プロセス全体の subscriber 初期化と、HTTP リクエスト単位のスパン生成を提供する。
//!
//! | 環境変数 | 既定値 | 用途 |
//! |---------|--------|------|
//! | `LOG_FORMAT` | `pretty` | `json` で 1 行 1 イベントの JSON 出力 |
//! | `RUST_LOG` | [`DEFAULT_LOG_FILTER`] | `EnvFilter` のディレクティブ |

use std::str::FromStr;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,roster=debug";

/// リクエスト ID を運ぶヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ログの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 集約基盤向けの JSON
    Json,
    /// 端末向けの整形済みテキスト
    #[default]
    Pretty,
}

/// 解釈できない `LOG_FORMAT` の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    /// 前後の空白と大文字小文字は無視する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

/// subscriber の初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// ルートスパンの `service` フィールドに載せる名前
    pub service_name: String,
    pub log_format:   LogFormat,
    /// `EnvFilter` に渡すディレクティブ
    pub filter:       String,
}

impl TracingConfig {
    /// 既定のフィルタで設定を作成する
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// `LOG_FORMAT` と `RUST_LOG` から設定を作成する
    ///
    /// subscriber 初期化前に呼ばれるため、不正な `LOG_FORMAT` の警告は stderr に出す。
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_values(
            service_name,
            std::env::var("LOG_FORMAT").ok().as_deref(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_values(
        service_name: impl Into<String>,
        log_format: Option<&str>,
        filter: Option<String>,
    ) -> Self {
        let log_format = match log_format.map(LogFormat::from_str) {
            None => LogFormat::default(),
            Some(Ok(format)) => format,
            Some(Err(UnknownLogFormat(raw))) => {
                eprintln!("WARNING: LOG_FORMAT={raw:?} は不明な値です。pretty を使用します");
                LogFormat::default()
            }
        };

        Self {
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            ..Self::new(service_name, log_format)
        }
    }
}

/// グローバル subscriber を登録する
///
/// `tracing_error::ErrorLayer` も登録し、インフラ層のエラーが
/// 生成時点の `SpanTrace` を保持できるようにする。
///
/// # エラー
///
/// 既に subscriber が登録されている場合、またはフィルタが不正な場合。
#[cfg(feature = "observability")]
pub fn init_tracing(
    config: &TracingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::{
        EnvFilter,
        Layer as _,
        fmt,
        layer::SubscriberExt,
        util::SubscriberInitExt,
    };

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.filter)?)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;

    Ok(())
}

/// HTTP リクエストごとのスパンを生成する
///
/// `TraceLayer::make_span_with` に渡す。`SetRequestIdLayer` より内側に置くこと。
/// ヘッダーがない場合は `request_id` に `-` を記録する。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
