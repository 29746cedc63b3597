//! The `facectl info` commands.

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Subcommand};
use facectl_core::api::{PersonSummary, SessionInfo};

use super::ApiContext;

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(subcommand)]
    pub command: InfoCommand,
}

#[derive(Subcommand, Debug)]
pub enum InfoCommand {
    /// Get the status of a task
    Session {
        /// Session id returned when the task was started
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        session_id: String,
    },

    /// List every person in the account
    Persons,
}

/// Execute the info command.
pub async fn execute(args: InfoArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    match args.command {
        InfoCommand::Session { session_id } => {
            let info = ctx.api().get_session(&session_id).await?;
            println!("{}", session_line(&info, &session_id));
        }
        InfoCommand::Persons => {
            let list = ctx.api().person_list().await?;
            tracing::debug!("{} person(s) listed", list.person.len());
            for person in &list.person {
                println!("{}", person_line(person));
            }
        }
    }
    Ok(())
}

fn session_line(info: &SessionInfo, requested: &str) -> String {
    let id = if info.session_id.is_empty() {
        requested
    } else {
        &info.session_id
    };
    format!("Status of session {id} is {}", info.status)
}

fn person_line(person: &PersonSummary) -> String {
    format!("{} ({}) {}", person.person_name, person.tag, person.person_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facectl_core::api::mock::MockApi;
    use facectl_core::FaceppConfig;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    #[tokio::test]
    async fn session_status_is_fetched_once() {
        let api = Arc::new(MockApi::with_statuses(&["PENDING"]));
        let ctx = ApiContext::new(api.clone(), FaceppConfig::default());
        let args = InfoArgs {
            command: InfoCommand::Session {
                session_id: "S1".into(),
            },
        };

        execute(args, &ctx).await.unwrap();
        assert_eq!(api.session_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn session_api_error_is_returned() {
        // No scripted status: the service answers 503.
        let ctx = ApiContext::new(Arc::new(MockApi::default()), FaceppConfig::default());
        let args = InfoArgs {
            command: InfoCommand::Session {
                session_id: "S1".into(),
            },
        };

        let err = execute(args, &ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "/info/get_session: unexpected status code: 503");
    }

    #[test]
    fn session_line_falls_back_to_requested_id() {
        let info = SessionInfo {
            status: "PENDING".into(),
            ..SessionInfo::default()
        };
        assert_eq!(session_line(&info, "S1"), "Status of session S1 is PENDING");
    }

    #[test]
    fn session_line_prefers_response_id() {
        let info = SessionInfo {
            session_id: "S2".into(),
            status: "SUCC".into(),
            ..SessionInfo::default()
        };
        assert_eq!(session_line(&info, "S1"), "Status of session S2 is SUCC");
    }

    #[test]
    fn person_line_format() {
        let person = PersonSummary {
            tag: "vip".into(),
            person_name: "Alice".into(),
            person_id: "p-1".into(),
        };
        assert_eq!(person_line(&person), "Alice (vip) p-1");
    }
}
