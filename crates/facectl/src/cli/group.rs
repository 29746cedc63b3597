//! The `facectl group` command.

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Subcommand};
use facectl_core::api::{GroupCreate, GroupCreated};

use super::ApiContext;

#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    /// Create a new group
    Create {
        /// Name of the group
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        group_name: String,

        /// Tag of the group
        #[arg(long)]
        tag: Option<String>,

        /// Comma-separated person names to add to the group
        #[arg(long = "person")]
        person_name: Option<String>,
    },
}

/// Execute the group command.
pub async fn execute(args: GroupArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    match args.command {
        GroupCommand::Create {
            group_name,
            tag,
            person_name,
        } => {
            let request = GroupCreate {
                group_name,
                tag,
                person_name,
            };
            let created = ctx.api().group_create(&request).await?;
            println!("{}", created_line(&created));
        }
    }
    Ok(())
}

fn created_line(created: &GroupCreated) -> String {
    format!(
        "created group {} ({}), added {} person(s)",
        created.group_name, created.tag, created.added_person
    )
}
