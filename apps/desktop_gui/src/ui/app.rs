use client_core::{
    view::{poll_view, PollView},
    vote_error_alert, NO_SELECTION_WARNING, POLL_LOAD_ERROR_TEXT,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

/// What currently fills the display region. Each variant fully replaces the
/// previous contents; there is no partial patching, so the last completed
/// render wins regardless of request ordering.
enum DisplayState {
    Loading,
    Poll { view: PollView },
    Error(String),
}

/// Per-attempt submission lifecycle. `Submitted` covers the in-flight POST,
/// `Refreshing` the follow-up fetch; both failure and a completed refresh
/// land back in `Idle`. Nothing retries automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VotePhase {
    Idle,
    Submitted,
    Refreshing,
}

/// Blocking notification: while present, the form underneath is disabled
/// until the user dismisses it.
#[derive(Clone)]
struct ModalAlert {
    message: String,
}

pub struct PollWidgetApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    display: DisplayState,
    selected: Option<String>,
    vote_phase: VotePhase,
    modal: Option<ModalAlert>,
    status_line: Option<String>,
}

impl PollWidgetApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut status_line = None;
        dispatch_backend_command(&cmd_tx, BackendCommand::LoadPoll, &mut status_line);
        Self {
            cmd_tx,
            ui_rx,
            display: DisplayState::Loading,
            selected: None,
            vote_phase: VotePhase::Idle,
            modal: None,
            status_line,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(text) => {
                self.status_line = Some(text);
            }
            UiEvent::PollLoaded(poll) => {
                // A refreshed poll may have dropped the option the user had
                // checked; clear the selection rather than submit a ghost.
                if let Some(selected) = &self.selected {
                    if !poll.options.contains(selected) {
                        self.selected = None;
                    }
                }
                self.display = DisplayState::Poll {
                    view: poll_view(&poll),
                };
                self.vote_phase = VotePhase::Idle;
            }
            UiEvent::PollLoadFailed => {
                self.display = DisplayState::Error(POLL_LOAD_ERROR_TEXT.to_string());
                self.vote_phase = VotePhase::Idle;
            }
            UiEvent::VoteAccepted => {
                self.vote_phase = VotePhase::Refreshing;
            }
            UiEvent::VoteFailed { reason } => {
                // Stale tallies stay visible; only the alert surfaces.
                self.modal = Some(ModalAlert {
                    message: vote_error_alert(&reason),
                });
                self.vote_phase = VotePhase::Idle;
            }
            UiEvent::BackendStartupFailed { reason } => {
                self.display = DisplayState::Error(reason);
                self.vote_phase = VotePhase::Idle;
            }
        }
    }

    /// Handle a press of the Vote control. No selection is terminal for the
    /// attempt: warn and send nothing. Otherwise the attempt enters
    /// `Submitted` only once the command is actually queued; a full or
    /// disconnected queue leaves the attempt at `Idle` so the user can
    /// re-click Vote.
    fn submit_vote_attempt(&mut self) {
        match self.selected.clone() {
            None => {
                self.modal = Some(ModalAlert {
                    message: NO_SELECTION_WARNING.to_string(),
                });
            }
            Some(option) => {
                if dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SubmitVote { option },
                    &mut self.status_line,
                ) {
                    self.vote_phase = VotePhase::Submitted;
                }
            }
        }
    }

    fn show_display_region(&mut self, ui: &mut egui::Ui) {
        let mut vote_clicked = false;
        match &self.display {
            DisplayState::Loading => {
                ui.label("Loading poll...");
            }
            DisplayState::Error(text) => {
                ui.colored_label(egui::Color32::LIGHT_RED, text);
            }
            DisplayState::Poll { view } => {
                ui.heading(&view.heading);
                ui.add_space(8.0);
                for row in &view.rows {
                    // Identifier collisions between options are permitted;
                    // the shared selection binding keeps each row distinct.
                    ui.push_id(&row.element_id, |ui| {
                        ui.radio_value(&mut self.selected, Some(row.value.clone()), &row.label);
                    });
                }
                ui.add_space(8.0);
                let submit_enabled = self.vote_phase == VotePhase::Idle;
                vote_clicked = ui
                    .add_enabled(submit_enabled, egui::Button::new(view.submit_label))
                    .clicked();
                match self.vote_phase {
                    VotePhase::Submitted => {
                        ui.label("Submitting vote...");
                    }
                    VotePhase::Refreshing => {
                        ui.label("Refreshing results...");
                    }
                    VotePhase::Idle => {}
                }
            }
        }
        if vote_clicked {
            self.submit_vote_attempt();
        }
    }

    fn show_modal(&mut self, ctx: &egui::Context) {
        let Some(modal) = self.modal.clone() else {
            return;
        };
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&modal.message);
                ui.add_space(4.0);
                if ui.button("OK").clicked() {
                    self.modal = None;
                }
            });
    }
}

impl eframe::App for PollWidgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let blocked = self.modal.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                self.show_display_region(ui);
                if let Some(status) = &self.status_line {
                    ui.add_space(12.0);
                    ui.weak(status);
                }
            });
        });
        self.show_modal(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crossbeam_channel::bounded;
    use shared::domain::PollData;

    use super::*;

    fn test_app() -> (PollWidgetApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
        let (_ui_tx, ui_rx) = bounded::<UiEvent>(8);
        (PollWidgetApp::new(cmd_tx, ui_rx), cmd_rx)
    }

    fn color_poll() -> PollData {
        PollData {
            question: "Color?".to_string(),
            options: vec!["Red".to_string(), "Blue".to_string()],
            votes: HashMap::from([("Red".to_string(), 2)]),
        }
    }

    fn rendered_labels(app: &PollWidgetApp) -> Vec<String> {
        match &app.display {
            DisplayState::Poll { view } => view.rows.iter().map(|row| row.label.clone()).collect(),
            _ => panic!("display does not hold a poll"),
        }
    }

    #[test]
    fn startup_queues_a_poll_load() {
        let (_app, cmd_rx) = test_app();
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::LoadPoll)));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn loaded_poll_replaces_display_and_rests_at_idle() {
        let (mut app, _cmd_rx) = test_app();
        app.apply_event(UiEvent::PollLoaded(color_poll()));

        assert_eq!(
            rendered_labels(&app),
            vec!["Red (2 votes)", "Blue (0 votes)"]
        );
        assert_eq!(app.vote_phase, VotePhase::Idle);
    }

    #[test]
    fn load_failure_shows_exact_inline_error() {
        let (mut app, _cmd_rx) = test_app();
        app.apply_event(UiEvent::PollLoadFailed);

        match &app.display {
            DisplayState::Error(text) => assert_eq!(
                text,
                "Error loading poll data. Is the backend running and accessible?"
            ),
            _ => panic!("display should hold the error text"),
        }
    }

    #[test]
    fn vote_without_selection_warns_and_sends_nothing() {
        let (mut app, cmd_rx) = test_app();
        app.apply_event(UiEvent::PollLoaded(color_poll()));
        let _ = cmd_rx.try_recv(); // drain the startup load

        app.submit_vote_attempt();
        assert_eq!(
            app.modal.as_ref().map(|modal| modal.message.as_str()),
            Some("Please select an option to vote.")
        );
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.vote_phase, VotePhase::Idle);
    }

    #[test]
    fn vote_with_selection_enters_submitted_phase() {
        let (mut app, cmd_rx) = test_app();
        app.apply_event(UiEvent::PollLoaded(color_poll()));
        app.selected = Some("Blue".to_string());
        let _ = cmd_rx.try_recv(); // drain the startup load

        app.submit_vote_attempt();
        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::SubmitVote { option } => assert_eq!(option, "Blue"),
            BackendCommand::LoadPoll => panic!("unexpected load command"),
        }
        assert_eq!(app.vote_phase, VotePhase::Submitted);
    }

    #[test]
    fn failed_dispatch_leaves_attempt_idle_for_retry() {
        // A zero-capacity channel refuses every try_send, standing in for
        // a full or disconnected command queue.
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(0);
        let (_ui_tx, ui_rx) = bounded::<UiEvent>(8);
        let mut app = PollWidgetApp::new(cmd_tx, ui_rx);
        app.apply_event(UiEvent::PollLoaded(color_poll()));
        app.selected = Some("Red".to_string());

        app.submit_vote_attempt();

        assert_eq!(app.vote_phase, VotePhase::Idle);
        assert!(cmd_rx.try_recv().is_err());
        assert!(app.status_line.is_some());

        // Once the queue accepts commands a re-click goes through.
        drop(cmd_rx);
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
        app.cmd_tx = cmd_tx;
        app.submit_vote_attempt();
        assert_eq!(app.vote_phase, VotePhase::Submitted);
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::SubmitVote { .. })
        ));
    }

    #[test]
    fn failed_vote_alerts_and_keeps_stale_tallies_visible() {
        let (mut app, _cmd_rx) = test_app();
        app.apply_event(UiEvent::PollLoaded(color_poll()));
        app.selected = Some("Red".to_string());
        app.submit_vote_attempt();

        app.apply_event(UiEvent::VoteFailed {
            reason: "Poll closed".to_string(),
        });

        assert_eq!(
            app.modal.as_ref().map(|modal| modal.message.as_str()),
            Some("Error submitting vote: Poll closed. Please try again.")
        );
        assert_eq!(app.vote_phase, VotePhase::Idle);
        assert_eq!(
            rendered_labels(&app),
            vec!["Red (2 votes)", "Blue (0 votes)"]
        );
    }

    #[test]
    fn successful_vote_cycles_through_refresh_back_to_idle() {
        let (mut app, _cmd_rx) = test_app();
        app.apply_event(UiEvent::PollLoaded(color_poll()));
        app.selected = Some("Red".to_string());
        app.submit_vote_attempt();
        assert_eq!(app.vote_phase, VotePhase::Submitted);

        app.apply_event(UiEvent::VoteAccepted);
        assert_eq!(app.vote_phase, VotePhase::Refreshing);

        let mut refreshed = color_poll();
        refreshed.votes.insert("Red".to_string(), 3);
        app.apply_event(UiEvent::PollLoaded(refreshed));

        assert_eq!(app.vote_phase, VotePhase::Idle);
        assert_eq!(
            rendered_labels(&app),
            vec!["Red (3 votes)", "Blue (0 votes)"]
        );
        // The selection survives because the option still exists.
        assert_eq!(app.selected.as_deref(), Some("Red"));
    }

    #[test]
    fn refresh_drops_selection_for_vanished_option() {
        let (mut app, _cmd_rx) = test_app();
        app.apply_event(UiEvent::PollLoaded(color_poll()));
        app.selected = Some("Blue".to_string());

        let replaced = PollData {
            question: "New question".to_string(),
            options: vec!["Green".to_string()],
            votes: HashMap::new(),
        };
        app.apply_event(UiEvent::PollLoaded(replaced));

        assert!(app.selected.is_none());
    }
}
