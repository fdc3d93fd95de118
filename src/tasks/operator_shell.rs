//! Operator shell background task

use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    commands::CommandInterpreter,
    shell::{OperatorShell, ShellExit},
};

/// Lifecycle reports from the shell thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// The line editor is initialized and reading input
    Ready,
    /// The line editor could not be initialized
    Failed(String),
    /// The read loop ended
    Finished(ShellExit),
}

/// Run the operator shell on its own thread.
///
/// The shell blocks on terminal input, so it lives outside the async runtime;
/// a process exit does not wait for it.
pub fn spawn_operator_shell(
    interpreter: CommandInterpreter,
    history_file: PathBuf,
) -> std::io::Result<mpsc::UnboundedReceiver<ShellEvent>> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    std::thread::Builder::new()
        .name("operator-shell".to_string())
        .spawn(move || {
            let shell = match OperatorShell::new(interpreter, history_file) {
                Ok(shell) => shell,
                Err(e) => {
                    let _ = event_tx.send(ShellEvent::Failed(format!("Error initializing readline: {}", e)));
                    return;
                }
            };
            let _ = event_tx.send(ShellEvent::Ready);

            let exit = shell.run();
            info!("Operator shell finished: {:?}", exit);
            let _ = event_tx.send(ShellEvent::Finished(exit));
        })?;

    Ok(event_rx)
}

/// Wait until the operator asks to exit.
///
/// End of input only closes the shell; the server keeps running.
pub async fn wait_for_exit_command(events: &mut mpsc::UnboundedReceiver<ShellEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            ShellEvent::Finished(ShellExit::Exit) => return,
            ShellEvent::Finished(ShellExit::EndOfInput) => {
                info!("Operator shell closed, server keeps running until a termination signal");
            }
            ShellEvent::Ready | ShellEvent::Failed(_) => {}
        }
    }
    std::future::pending::<()>().await
}
