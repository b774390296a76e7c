//! Backend commands queued from UI to the backend worker.

pub enum BackendCommand {
    /// Fetch the current poll and publish it for rendering.
    LoadPoll,
    /// Submit a vote for the chosen option; on success the worker re-fetches
    /// the poll so updated tallies replace the display.
    SubmitVote { option: String },
}
