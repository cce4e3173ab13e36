//! # Roster API サーバー
//!
//! 学生名簿の CRUD API を提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `ROSTER_HOST` | `0.0.0.0` | バインドアドレス |
//! | `ROSTER_PORT` | `8082` | ポート番号 |
//! | `DATABASE_URL` | `sqlite://storage/roster.db` | SQLite 接続 URL |
//! | `SHUTDOWN_GRACE_SECS` | `5` | シャットダウン時の猶予秒数 |
//! | `LOG_FORMAT` | `pretty` | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p roster-api
//!
//! # 本番環境
//! LOG_FORMAT=json DATABASE_URL=sqlite:///var/lib/roster/roster.db cargo run -p roster-api --release
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use roster_api::{
    app::build_router,
    config::ApiConfig,
    handler::StudentState,
    usecase::StudentUseCaseImpl,
};
use roster_infra::{db, repository::SqliteStudentRepository};
use roster_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::Instrument as _;

/// サービス名（ルートスパンとログに出力）
const SERVICE_NAME: &str = "roster-api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env(SERVICE_NAME);
    init_tracing(&tracing_config)
        .map_err(|e| anyhow::anyhow!(e))
        .context("トレーシングの初期化に失敗しました")?;

    let root_span = tracing::info_span!("app", service = %tracing_config.service_name);
    run().instrument(root_span).await
}

/// 設定を読み込み、シャットダウンまでサーバーを動かす
async fn run() -> anyhow::Result<()> {
    // 設定読み込み
    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Roster API サーバーを起動します: {}",
        config.bind_address()
    );

    // データベース接続とスキーマ確認
    let pool = db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("データベース接続に失敗しました: {}", config.database_url))?;
    let repository = SqliteStudentRepository::init(pool)
        .await
        .context("students テーブルの作成に失敗しました")?;
    tracing::info!("ストレージを初期化しました");

    // 依存コンポーネントを初期化
    let usecase = StudentUseCaseImpl::new(Arc::new(repository));
    let state = Arc::new(StudentState { usecase });
    let app = build_router(state);

    // サーバー起動
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("ポートのバインドに失敗しました: {}", config.bind_address()))?;
    tracing::info!("Roster API サーバーが起動しました: {}", listener.local_addr()?);

    let (signal_tx, signal_rx) = oneshot::channel();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                signal_rx.await.ok();
            })
            .await
    });

    shutdown_signal().await;
    // 受信済みのシグナルを serve に伝え、猶予時間だけ処理中のリクエストを待つ
    signal_tx.send(()).ok();
    drain(server, config.shutdown_grace).await?;

    tracing::info!("Roster API サーバーを停止しました");
    Ok(())
}

/// SIGINT（Ctrl+C）または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT を受信しました。シャットダウンを開始します"),
        () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンを開始します"),
    }
}

/// 猶予時間内にサーバーの終了を待つ
///
/// 猶予時間を過ぎた場合は残りの接続を破棄して戻る。
async fn drain(
    mut server: tokio::task::JoinHandle<std::io::Result<()>>,
    grace: Duration,
) -> anyhow::Result<()> {
    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => {
            joined.context("サーバータスクが異常終了しました")??;
        }
        Err(_) => {
            server.abort();
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "猶予時間内に完了しなかったリクエストを破棄しました"
            );
        }
    }
    Ok(())
}
