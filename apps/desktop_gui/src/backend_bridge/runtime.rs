//! Backend worker: owns the tokio runtime and the HTTP client, drains the
//! UI command queue, and feeds results back as [`UiEvent`]s.

use std::thread;

use client_core::PollClient;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(api_base: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendStartupFailed {
                    reason: format!("failed to build backend runtime: {err}"),
                });
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = PollClient::new(api_base);
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadPoll => {
                        tracing::info!("backend: load_poll");
                        load_and_publish(&client, &ui_tx).await;
                    }
                    BackendCommand::SubmitVote { option } => {
                        tracing::info!(%option, "backend: submit_vote");
                        match client.submit_vote(&option).await {
                            Ok(_ack) => {
                                let _ = ui_tx.try_send(UiEvent::VoteAccepted);
                                // Success path refreshes the display; failure
                                // above leaves the stale tallies visible.
                                load_and_publish(&client, &ui_tx).await;
                            }
                            Err(err) => {
                                tracing::error!("backend: submit_vote failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::VoteFailed {
                                    reason: err.user_reason(),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}

async fn load_and_publish(client: &PollClient, ui_tx: &Sender<UiEvent>) {
    match client.fetch_poll().await {
        Ok(poll) => {
            let _ = ui_tx.try_send(UiEvent::PollLoaded(poll));
        }
        Err(err) => {
            tracing::error!("backend: fetch_poll failed: {err}");
            let _ = ui_tx.try_send(UiEvent::PollLoadFailed);
        }
    }
}
