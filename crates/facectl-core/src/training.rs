//! Waiting for an asynchronous training session to finish.

use crate::api::{FaceApi, SessionInfo, SessionStatus};
use crate::error::TrainingError;
use std::time::Duration;

/// How to poll a session.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Sleep before each status request
    pub interval: Duration,
    /// Give up after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

/// Poll `session_id` until it reports `SUCC` or `FAILED`.
///
/// Any other status is passed to `on_progress` verbatim, once per poll.
/// API errors end the wait immediately.
pub async fn wait_for_session<F>(
    api: &dyn FaceApi,
    session_id: &str,
    options: &PollOptions,
    mut on_progress: F,
) -> Result<SessionInfo, TrainingError>
where
    F: FnMut(&str),
{
    let poll = poll_until_done(api, session_id, options.interval, &mut on_progress);

    match options.timeout {
        Some(limit) => tokio::time::timeout(limit, poll)
            .await
            .map_err(|_| TrainingError::TimedOut {
                session_id: session_id.to_string(),
                waited_secs: limit.as_secs(),
            })?,
        None => poll.await,
    }
}

async fn poll_until_done<F>(
    api: &dyn FaceApi,
    session_id: &str,
    interval: Duration,
    on_progress: &mut F,
) -> Result<SessionInfo, TrainingError>
where
    F: FnMut(&str),
{
    loop {
        tokio::time::sleep(interval).await;
        let info = api.get_session(session_id).await?;
        match info.state() {
            SessionStatus::Succeeded => return Ok(info),
            SessionStatus::Failed => {
                return Err(TrainingError::Failed {
                    session_id: session_id.to_string(),
                })
            }
            SessionStatus::Pending(status) => {
                tracing::debug!("Session {session_id} still {status}");
                on_progress(&status);
            }
        }
    }
}
