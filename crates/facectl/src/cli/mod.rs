//! Command handlers for the `facectl` binary.

pub mod config;
pub mod group;
pub mod info;
pub mod person;
pub mod recognition;
pub mod train;

use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use facectl_core::{Config, FaceApi, FaceppClient, FaceppConfig, LoadOutcome};
use std::path::Path;
use std::sync::Arc;

/// Settings and client shared by every API command of one invocation.
pub struct ApiContext {
    api: Arc<dyn FaceApi>,
    settings: FaceppConfig,
}

impl ApiContext {
    /// Load the config and build a client.
    ///
    /// Returns `None` when the config was missing and a template was just
    /// written; the caller should stop without doing any API work.
    pub fn load(config_path: &Path) -> anyhow::Result<Option<Self>> {
        match Config::load_or_bootstrap(config_path)? {
            LoadOutcome::Ready(config) => Ok(Some(Self::new(
                Arc::new(FaceppClient::from_config(&config.faceplusplus)),
                config.faceplusplus,
            ))),
            LoadOutcome::Bootstrapped(path) => {
                println!(
                    "Wrote config file {}, please fill out and restart the program",
                    path.display()
                );
                Ok(None)
            }
        }
    }

    pub fn new(api: Arc<dyn FaceApi>, settings: FaceppConfig) -> Self {
        Self { api, settings }
    }

    pub fn api(&self) -> &dyn FaceApi {
        self.api.as_ref()
    }

    /// Shared handle for spawned tasks.
    pub fn api_handle(&self) -> Arc<dyn FaceApi> {
        self.api.clone()
    }

    pub fn settings(&self) -> &FaceppConfig {
        &self.settings
    }
}

/// Where the image comes from: exactly one of `--image-url` or `--image`.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ImageSource {
    /// URL of the image
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub image_url: Option<String>,

    /// Path of the image; glob patterns such as `photos/*.jpg` are expanded
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub image: Option<String>,
}

/// Resolved form of `ImageSource`.
#[derive(Debug, PartialEq, Eq)]
pub enum Source<'a> {
    Url(&'a str),
    Files(&'a str),
}

impl ImageSource {
    pub fn resolve(&self) -> anyhow::Result<Source<'_>> {
        match (self.image_url.as_deref(), self.image.as_deref()) {
            (Some(url), _) => Ok(Source::Url(url)),
            (None, Some(pattern)) => Ok(Source::Files(pattern)),
            (None, None) => anyhow::bail!("not enough arguments: pass --image-url or --image"),
        }
    }
}

/// Build the stderr progress bar used by glob-based commands.
pub(crate) fn create_progress_bar(total: u64) -> anyhow::Result<indicatif::ProgressBar> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_wins_when_resolving() {
        let source = ImageSource {
            image_url: Some("http://x/y.jpg".into()),
            image: None,
        };
        assert_eq!(source.resolve().unwrap(), Source::Url("http://x/y.jpg"));
    }

    #[test]
    fn image_resolves_to_files() {
        let source = ImageSource {
            image_url: None,
            image: Some("photos/*.jpg".into()),
        };
        assert_eq!(source.resolve().unwrap(), Source::Files("photos/*.jpg"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let source = ImageSource {
            image_url: None,
            image: None,
        };
        assert!(source.resolve().is_err());
    }

    #[test]
    fn bootstrap_returns_no_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(ApiContext::load(&path).unwrap().is_none());
        assert!(path.exists());
        assert!(ApiContext::load(&path).unwrap().is_some());
    }
}
