//! Events flowing from the backend worker to the widget UI.

use shared::domain::PollData;

pub enum UiEvent {
    Info(String),
    /// A fresh poll replaces the display wholesale; no incremental merge.
    PollLoaded(PollData),
    /// Fetch failed (transport or backend); the display region is replaced
    /// with the fixed load-error text. Details are already logged.
    PollLoadFailed,
    /// The vote POST succeeded; the worker is re-fetching tallies.
    VoteAccepted,
    /// The vote POST failed; `reason` feeds the blocking alert and the
    /// previous render stays visible.
    VoteFailed { reason: String },
    BackendStartupFailed { reason: String },
}
