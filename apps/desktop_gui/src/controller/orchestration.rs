//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Returns whether the command was actually queued; callers must not act
/// as if a request is in flight when this reports `false`.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut Option<String>,
) -> bool {
    let cmd_name = match &cmd {
        BackendCommand::LoadPoll => "load_poll",
        BackendCommand::SubmitVote { .. } => "submit_vote",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = Some("UI command queue is full; please retry".to_string());
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = Some(
                "Backend command processor disconnected (possible startup/runtime failure)"
                    .to_string(),
            );
            false
        }
    }
}
