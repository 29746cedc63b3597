//! The `facectl person` commands: create a person and add faces to it.

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Subcommand};
use facectl_core::api::{PersonCreate, PersonCreated};
use facectl_core::batch::{self, BatchUploader, EnrollOutcome};
use facectl_core::enroll;

use super::{create_progress_bar, ApiContext, ImageSource, Source};

/// Arguments for the `person` command.
#[derive(Args, Debug)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommand,
}

/// Subcommands for person management.
#[derive(Subcommand, Debug)]
pub enum PersonCommand {
    /// Create a new person inside a group
    Create(CreateArgs),

    /// Add a face to a person
    AddFace(AddFaceArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the new person
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub person_name: String,

    /// Group the person joins
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub group_name: String,

    /// Tag of the person
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddFaceArgs {
    /// Person the face belongs to
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub person_name: String,

    #[command(flatten)]
    pub source: ImageSource,
}

/// Execute the person command.
pub async fn execute(args: PersonArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    match args.command {
        PersonCommand::Create(args) => create(args, ctx).await,
        PersonCommand::AddFace(args) => add_face(args, ctx).await,
    }
}

async fn create(args: CreateArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    let request = PersonCreate {
        person_name: Some(args.person_name),
        group_name: Some(args.group_name),
        tag: args.tag,
        face_id: None,
    };
    let created = ctx.api().person_create(&request).await?;
    println!("{}", created_line(&created));
    Ok(())
}

async fn add_face(args: AddFaceArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    match args.source.resolve()? {
        Source::Url(url) => {
            let enrolled = enroll::enroll_from_url(ctx.api(), &args.person_name, url).await?;
            println!("added {} face to person {}", enrolled.added, args.person_name);
        }
        Source::Files(pattern) => {
            let paths = batch::expand_glob(pattern)?;
            let uploader = BatchUploader::from_config(ctx.api_handle(), ctx.settings())?;
            if paths.is_empty() {
                tracing::warn!("No files match {pattern}");
                return Ok(());
            }
            tracing::info!(
                "Adding faces from {} image(s) with {} concurrent request(s)",
                paths.len(),
                uploader.concurrency()
            );

            let progress = create_progress_bar(paths.len() as u64)?;
            let bar = progress.clone();
            let person_name = args.person_name.clone();

            let summary = uploader
                .enroll_batch(&args.person_name, paths, move |outcome| {
                    bar.suspend(|| println!("{}", outcome_line(&outcome, &person_name)));
                    bar.inc(1);
                })
                .await;
            progress.finish_and_clear();

            if summary.failed > 0 {
                tracing::warn!(
                    "Add-face: {} succeeded, {} failed",
                    summary.succeeded,
                    summary.failed
                );
            } else {
                tracing::info!("Add-face: {} succeeded", summary.succeeded);
            }
        }
    }
    Ok(())
}

fn created_line(created: &PersonCreated) -> String {
    format!("created person {} ({})", created.person_name, created.tag)
}

/// One console line per batch file.
fn outcome_line(outcome: &EnrollOutcome, person_name: &str) -> String {
    let path = outcome.path.display();
    match &outcome.result {
        Ok(enrolled) => format!(
            "{path} added {} face to person {person_name}",
            enrolled.added
        ),
        Err(e) => format!("{path} failed: {e}"),
    }
}
