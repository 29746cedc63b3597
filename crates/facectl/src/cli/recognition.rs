//! The `facectl recognition` command: identify faces against a trained group.

use anyhow::anyhow;
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Subcommand};
use facectl_core::api::{Candidate, IdentifyOptions, Identification};
use facectl_core::batch;

use super::{ApiContext, ImageSource, Source};

#[derive(Args, Debug)]
pub struct RecognitionArgs {
    #[command(subcommand)]
    pub command: RecognitionCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecognitionCommand {
    /// Identify the most similar person within a group (uses the largest face in the picture)
    Identify(IdentifyArgs),
}

#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Group to search
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub group_name: String,

    #[command(flatten)]
    pub source: ImageSource,
}

/// Execute the recognition command.
pub async fn execute(args: RecognitionArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    match args.command {
        RecognitionCommand::Identify(args) => identify(args, ctx).await,
    }
}

async fn identify(args: IdentifyArgs, ctx: &ApiContext) -> anyhow::Result<()> {
    let options = IdentifyOptions::one_face();

    match args.source.resolve()? {
        Source::Url(url) => {
            let identification = ctx
                .api()
                .identify_url(&args.group_name, url, &options)
                .await?;
            for candidate in matching_candidates(&identification)? {
                println!("{}", candidate_line(candidate));
            }
        }
        Source::Files(pattern) => {
            // One file at a time; only enrollment runs concurrently.
            for path in batch::expand_glob(pattern)? {
                let identification = match ctx
                    .api()
                    .identify_file(&args.group_name, &path, &options)
                    .await
                {
                    Ok(identification) => identification,
                    Err(e) => {
                        println!("{} failed: {e}", path.display());
                        continue;
                    }
                };
                for candidate in matching_candidates(&identification)? {
                    println!("{} {}", path.display(), candidate_line(candidate));
                }
            }
        }
    }
    Ok(())
}

fn matching_candidates(identification: &Identification) -> anyhow::Result<&[Candidate]> {
    identification
        .candidates()
        .ok_or_else(|| anyhow!("found no matching face"))
}

fn candidate_line(candidate: &Candidate) -> String {
    format!(
        "confidence {:.2}%: found {} ({})",
        candidate.confidence, candidate.person_name, candidate.tag
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use facectl_core::api::mock::MockApi;
    use facectl_core::api::IdentifiedFace;
    use facectl_core::FaceppConfig;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn identify_args(image_url: Option<&str>, image: Option<&str>) -> IdentifyArgs {
        IdentifyArgs {
            group_name: "family".into(),
            source: ImageSource {
                image_url: image_url.map(String::from),
                image: image.map(String::from),
            },
        }
    }

    #[tokio::test]
    async fn identify_by_url_without_candidates_fails() {
        let api = Arc::new(MockApi::default());
        let ctx = ApiContext::new(api.clone(), FaceppConfig::default());

        let err = identify(identify_args(Some("http://x/who.jpg"), None), &ctx)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "found no matching face");
        assert_eq!(api.identify_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn identify_by_url_with_candidates_succeeds() {
        let api = Arc::new(MockApi::with_candidates(vec![candidate(98.5, "Alice", "vip")]));
        let ctx = ApiContext::new(api, FaceppConfig::default());

        identify(identify_args(Some("http://x/who.jpg"), None), &ctx)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn identify_by_glob_continues_past_api_errors() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let api = Arc::new(MockApi {
            failing_paths: vec!["a.jpg".to_string()],
            ..MockApi::with_candidates(vec![candidate(50.0, "Bob", "")])
        });
        let ctx = ApiContext::new(api.clone(), FaceppConfig::default());
        let pattern = format!("{}/*.jpg", dir.path().display());

        identify(identify_args(None, Some(&pattern)), &ctx)
            .await
            .unwrap();

        assert_eq!(api.identify_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn identify_by_glob_stops_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        let ctx = ApiContext::new(Arc::new(MockApi::default()), FaceppConfig::default());
        let pattern = format!("{}/*.jpg", dir.path().display());

        let err = identify(identify_args(None, Some(&pattern)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "found no matching face");
    }

    fn candidate(confidence: f64, name: &str, tag: &str) -> Candidate {
        Candidate {
            confidence,
            person_name: name.into(),
            tag: tag.into(),
            ..Candidate::default()
        }
    }

    #[test]
    fn candidate_lines_keep_two_decimals() {
        assert_eq!(
            candidate_line(&candidate(98.5, "Alice", "vip")),
            "confidence 98.50%: found Alice (vip)"
        );
        assert_eq!(
            candidate_line(&candidate(12.0, "Bob", "")),
            "confidence 12.00%: found Bob ()"
        );
    }

    #[test]
    fn candidates_keep_server_order() {
        let identification = Identification {
            face: vec![IdentifiedFace {
                face_id: "f1".into(),
                candidate: vec![candidate(12.0, "Bob", ""), candidate(98.5, "Alice", "vip")],
            }],
            ..Identification::default()
        };
        let names: Vec<_> = matching_candidates(&identification)
            .unwrap()
            .iter()
            .map(|c| c.person_name.as_str())
            .collect();
        assert_eq!(names, ["Bob", "Alice"]);
    }

    #[test]
    fn no_candidates_is_an_error() {
        let err = matching_candidates(&Identification::default()).unwrap_err();
        assert_eq!(err.to_string(), "found no matching face");
    }

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: RecognitionCommand,
    }

    #[test]
    fn both_sources_conflict() {
        let argv = [
            "recognition",
            "identify",
            "G1",
            "--image-url",
            "http://x/y.jpg",
            "--image",
            "y.jpg",
        ];
        assert!(Harness::try_parse_from(argv).is_err());
    }

    #[test]
    fn a_source_is_required() {
        assert!(Harness::try_parse_from(["recognition", "identify", "G1"]).is_err());
    }

    #[test]
    fn url_source_parses() {
        let argv = ["recognition", "identify", "G1", "--image-url", "http://x/y.jpg"];
        let RecognitionCommand::Identify(args) = Harness::try_parse_from(argv).unwrap().command;
        assert_eq!(args.group_name, "G1");
        assert_eq!(args.source.resolve().unwrap(), Source::Url("http://x/y.jpg"));
    }
}
