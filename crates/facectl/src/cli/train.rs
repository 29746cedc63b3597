//! The `facectl train` command: start identify-model training for a group.

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Args, Subcommand};
use facectl_core::PollOptions;
use facectl_core::training;
use std::time::Duration;

use super::ApiContext;

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(subcommand)]
    pub command: TrainCommand,
}

#[derive(Subcommand, Debug)]
pub enum TrainCommand {
    /// Train the identify model of a group
    Identify(IdentifyArgs),
}

#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Group whose identify model is trained
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub group_name: String,

    /// Wait for the training session to finish (`--block=false` returns at once)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub block: bool,

    /// Seconds between session status checks while blocking
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: u64,

    /// Give up waiting after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl IdentifyArgs {
    fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_secs(self.poll_interval),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Execute the train command.
pub async fn execute(args: TrainArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    match args.command {
        TrainCommand::Identify(args) => identify(args, ctx).await,
    }
}

async fn identify(args: IdentifyArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    let started = ctx.api().train_identify(&args.group_name).await?;
    let session_id = started.session_id;

    if !args.block {
        println!(
            "identify model training of group {} started, your session id: {}",
            args.group_name, session_id
        );
        println!("(try info session {session_id})");
        return Ok(());
    }

    println!(
        "queued training of the identify model of group {} (session id: {})",
        args.group_name, session_id
    );
    training::wait_for_session(ctx.api(), &session_id, &args.poll_options(), |status| {
        println!("status: {status}");
    })
    .await?;
    println!("task done");
    Ok(())
}
