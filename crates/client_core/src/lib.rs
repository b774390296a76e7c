use reqwest::{Client, StatusCode};
use shared::{
    domain::PollData,
    protocol::{ErrorBody, VoteAck, VoteRequest},
};
use thiserror::Error;
use tracing::{info, warn};

pub mod config;
pub mod view;

/// Inline text that replaces the display region when the initial poll fetch
/// fails for any reason (transport or backend).
pub const POLL_LOAD_ERROR_TEXT: &str =
    "Error loading poll data. Is the backend running and accessible?";

/// Blocking warning shown when Vote is pressed with no option selected.
pub const NO_SELECTION_WARNING: &str = "Please select an option to vote.";

/// Blocking alert text for a failed vote submission.
pub fn vote_error_alert(reason: &str) -> String {
    format!("Error submitting vote: {reason}. Please try again.")
}

#[derive(Debug, Error)]
pub enum FetchPollError {
    #[error("failed to reach poll endpoint: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("poll endpoint returned HTTP {status}")]
    Backend { status: StatusCode },
    #[error("invalid poll payload: {0}")]
    Payload(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum SubmitVoteError {
    #[error("failed to reach vote endpoint: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("{message}")]
    Backend { status: StatusCode, message: String },
    #[error("invalid vote acknowledgement: {0}")]
    Payload(#[source] reqwest::Error),
}

impl SubmitVoteError {
    /// Reason inserted into the "Error submitting vote: ..." alert. Backend
    /// failures carry the extracted `error` field (or the synthesized status
    /// line); transport and payload failures carry the underlying cause.
    pub fn user_reason(&self) -> String {
        match self {
            Self::Transport(err) => err.to_string(),
            Self::Backend { message, .. } => message.clone(),
            Self::Payload(err) => err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum VoteRoundTripError {
    #[error(transparent)]
    Submit(#[from] SubmitVoteError),
    #[error(transparent)]
    Refresh(#[from] FetchPollError),
}

/// HTTP client for the poll backend. The API base is resolved once at
/// startup (see [`config`]) and injected here; the client never consults
/// ambient state.
pub struct PollClient {
    http: Client,
    api_base: String,
}

impl PollClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `GET <base>/polls`. Idempotent read; safe to call repeatedly.
    pub async fn fetch_poll(&self) -> Result<PollData, FetchPollError> {
        let response = self
            .http
            .get(format!("{}/polls", self.api_base))
            .send()
            .await
            .map_err(FetchPollError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "poll fetch rejected by backend");
            return Err(FetchPollError::Backend { status });
        }

        let poll: PollData = response.json().await.map_err(FetchPollError::Payload)?;
        info!(
            question = %poll.question,
            options = poll.options.len(),
            "fetched poll"
        );
        Ok(poll)
    }

    /// `POST <base>/vote` with a JSON `{"option": ...}` body. On a non-2xx
    /// response the backend's `error` field is surfaced when present, else
    /// the status code is reported verbatim.
    pub async fn submit_vote(&self, option: &str) -> Result<VoteAck, SubmitVoteError> {
        info!(%option, "submitting vote");
        let response = self
            .http
            .post(format!("{}/vote", self.api_base))
            .json(&VoteRequest {
                option: option.to_string(),
            })
            .send()
            .await
            .map_err(SubmitVoteError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP error, status {}", status.as_u16()));
            warn!(%status, %message, "vote rejected by backend");
            return Err(SubmitVoteError::Backend { status, message });
        }

        let ack: VoteAck = response.json().await.map_err(SubmitVoteError::Payload)?;
        if let Some(message) = &ack.message {
            info!(%message, "vote accepted");
        }
        Ok(ack)
    }

    /// Cast a vote, then re-read the poll so updated tallies replace the
    /// display. A vote that lands but whose refresh fails surfaces the fetch
    /// failure; the vote itself is never retried.
    pub async fn vote_and_refresh(&self, option: &str) -> Result<PollData, VoteRoundTripError> {
        self.submit_vote(option).await?;
        Ok(self.fetch_poll().await?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
