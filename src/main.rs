//! Quizcast - A shared quiz question and timer broadcaster
//!
//! This is the main entry point for the quizcast application.

use std::{sync::Arc, time::Duration};
use anyhow::Context;
use chrono::Utc;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info, warn};

use quizcast::{
    api::create_router,
    commands::CommandInterpreter,
    config::Config,
    services::QuestionBankNotifier,
    state::{AppState, QuestionState, StateStore},
    tasks::{spawn_operator_shell, wait_for_exit_command, ShellEvent},
    utils::shutdown_signal,
};

const NOTIFY_FLUSH_LIMIT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("quizcast={},tower_http=info", config.log_level()))
        .init();

    info!("Starting quizcast server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, time={}s, type={}",
          config.host, config.port, config.time, config.kind);

    let notifier = match config.notify_url() {
        Some(url) => {
            let notifier = QuestionBankNotifier::new(url);
            info!("Question bank notifications go to {}", notifier.endpoint().unwrap_or(url));
            notifier
        }
        None => {
            info!("Question bank notifications disabled");
            QuestionBankNotifier::disabled()
        }
    };

    // Create application state
    let initial = QuestionState::new(config.question.clone(), Duration::from_secs(config.time), config.kind, Utc::now());
    let store = StateStore::new(initial, config.time);
    let state = Arc::new(AppState::new(store, notifier, config.port, config.host.clone()));

    // Bind before anything reads operator input so a busy port fails fast
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Error starting server on {}", addr))?;

    let mut shell_events = spawn_operator_shell(
        CommandInterpreter::new(Arc::clone(&state)),
        config.history_file.clone(),
    )
    .context("Error starting operator shell")?;

    match shell_events.recv().await {
        Some(ShellEvent::Ready) => {}
        Some(ShellEvent::Failed(e)) => anyhow::bail!(e),
        other => anyhow::bail!("Operator shell did not start: {:?}", other),
    }

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /get-question - Live question and timer");
    info!("  POST /set-question - Replace the question");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let app = create_router(Arc::clone(&state));
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(anyhow::Error::new(e).context("Server error")),
                Err(e) => Err(anyhow::Error::new(e).context("Server task failed")),
            };
        }
        result = shutdown_signal() => {
            result.context("Failed to install signal handler")?;
            info!("Shutdown signal received");
        }
        _ = wait_for_exit_command(&mut shell_events) => {
            info!("Exit requested from operator shell");
        }
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(config.grace_period(), server).await {
        Ok(Ok(Ok(()))) => info!("Server shutdown complete"),
        Ok(Ok(Err(e))) => error!("Server error during shutdown: {}", e),
        Ok(Err(e)) => error!("Server task failed during shutdown: {}", e),
        Err(_) => warn!("In-flight requests did not finish within {}s, hard stop", config.grace),
    }

    // the last operator command may still be posting to the question bank
    if !state.notifier.flush(NOTIFY_FLUSH_LIMIT).await {
        warn!("Question bank notifications still pending at exit, dropped");
    }

    Ok(())
}
