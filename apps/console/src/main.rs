use anyhow::Result;
use clap::Parser;
use client_core::{
    config::{self, Settings},
    view::poll_view,
    vote_error_alert, PollClient, VoteRoundTripError, NO_SELECTION_WARNING, POLL_LOAD_ERROR_TEXT,
};
use shared::domain::PollData;

/// Fetch the current poll, print it, and optionally cast a vote.
#[derive(Parser, Debug)]
struct Args {
    /// Host name the widget resolves its API base from.
    #[arg(long)]
    host: Option<String>,
    /// Origin the relative `/api` base resolves against for non-local hosts.
    #[arg(long)]
    origin: Option<String>,
    /// Option to vote for after displaying the poll.
    #[arg(long)]
    vote: Option<String>,
}

fn print_poll(poll: &PollData) {
    let view = poll_view(poll);
    println!("{}", view.heading);
    for row in &view.rows {
        println!("  ( ) {}", row.label);
    }
    println!("  {} total votes", poll.total_votes());
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings: Settings = config::load_settings();
    if let Some(host) = args.host {
        settings.api_host = host;
    }
    if let Some(origin) = args.origin {
        settings.origin = origin;
    }

    let api_base = settings.api_base()?;
    tracing::info!(%api_base, "using poll API base");
    let client = PollClient::new(api_base);

    match client.fetch_poll().await {
        Ok(poll) => print_poll(&poll),
        Err(err) => {
            tracing::error!("poll fetch failed: {err}");
            println!("{POLL_LOAD_ERROR_TEXT}");
            return Ok(());
        }
    }

    if let Some(option) = args.vote {
        if option.trim().is_empty() {
            println!("{NO_SELECTION_WARNING}");
            return Ok(());
        }

        match client.vote_and_refresh(&option).await {
            Ok(poll) => {
                println!("Vote recorded for '{option}'.");
                print_poll(&poll);
            }
            Err(VoteRoundTripError::Submit(err)) => {
                tracing::error!("vote submission failed: {err}");
                println!("{}", vote_error_alert(&err.user_reason()));
            }
            Err(VoteRoundTripError::Refresh(err)) => {
                tracing::error!("post-vote refresh failed: {err}");
                println!("{POLL_LOAD_ERROR_TEXT}");
            }
        }
    }

    Ok(())
}
