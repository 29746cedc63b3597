//! Batch enrollment of every image matched by a glob pattern.
//!
//! One tokio task per file, bounded by a semaphore. Outcomes are delivered
//! through a callback as each file finishes, so the CLI can print them in
//! completion order.

use crate::api::FaceApi;
use crate::config::FaceppConfig;
use crate::enroll::{self, Enrolled};
use crate::error::{BatchError, EnrollError};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Expand `pattern` into a sorted list of matching paths.
///
/// An invalid pattern fails the whole batch. Entries that cannot be read
/// while matching are skipped.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, BatchError> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => tracing::warn!("Skipping unreadable path {:?}: {}", e.path(), e.error()),
        }
    }
    paths.sort();
    Ok(paths)
}

/// Result of enrolling a single file.
#[derive(Debug)]
pub struct EnrollOutcome {
    pub path: PathBuf,
    pub result: Result<Enrolled, EnrollError>,
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Concurrent "detect one face, add it to a person" over many files.
pub struct BatchUploader {
    api: Arc<dyn FaceApi>,
    concurrency: usize,
}

impl BatchUploader {
    /// `concurrency` is the number of files in flight; values below 1 are raised to 1.
    pub fn new(api: Arc<dyn FaceApi>, concurrency: usize) -> Self {
        Self {
            api,
            concurrency: concurrency.max(1),
        }
    }

    /// Sized by the `concurrent requests` setting.
    pub fn from_config(api: Arc<dyn FaceApi>, config: &FaceppConfig) -> Result<Self, BatchError> {
        Ok(Self::new(api, config.concurrent_requests()?))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Enroll every path for `person_name`.
    ///
    /// Waits for a free slot before spawning each file, calls `on_result`
    /// once per file, and returns after every spawned task has finished.
    /// A failing file never stops the rest of the batch.
    pub async fn enroll_batch<F>(
        &self,
        person_name: &str,
        paths: Vec<PathBuf>,
        on_result: F,
    ) -> BatchSummary
    where
        F: Fn(EnrollOutcome) + Send + Sync + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let on_result = Arc::new(on_result);
        let person_name: Arc<str> = Arc::from(person_name);
        let mut handles = Vec::with_capacity(paths.len());

        for path in paths {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::warn!("Upload semaphore closed unexpectedly; stopping batch");
                    break;
                }
            };

            let api = self.api.clone();
            let on_result = on_result.clone();
            let person_name = person_name.clone();

            let handle = tokio::spawn(async move {
                let result = enroll::enroll_from_file(api.as_ref(), &person_name, &path).await;
                let success = result.is_ok();
                drop(permit); // Free the slot before reporting
                on_result(EnrollOutcome { path, result });
                success
            });

            handles.push(handle);
        }

        let mut summary = BatchSummary::default();
        for handle in handles {
            match handle.await {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    tracing::error!("Upload task panicked: {e}");
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::error::ConfigError;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;
    use std::time::Duration;

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("img_{i}.jpg"))).collect()
    }

    /// Run a batch, collecting every outcome.
    async fn run_batch(
        api: Arc<MockApi>,
        concurrency: usize,
        paths: Vec<PathBuf>,
    ) -> (Vec<EnrollOutcome>, BatchSummary) {
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = outcomes.clone();
        let uploader = BatchUploader::new(api, concurrency);
        let summary = uploader
            .enroll_batch("Alice", paths, move |outcome| {
                sink.lock().unwrap().push(outcome);
            })
            .await;
        let outcomes = Arc::try_unwrap(outcomes).unwrap().into_inner().unwrap();
        (outcomes, summary)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_is_bounded() {
        let api = Arc::new(MockApi::with_faces(1).delay(Duration::from_millis(100)));
        let max_in_flight = api.max_in_flight.clone();

        let (outcomes, summary) = run_batch(api.clone(), 2, paths(7)).await;

        assert_eq!(outcomes.len(), 7);
        assert_eq!(summary, BatchSummary { succeeded: 7, failed: 0 });
        let max = max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 2, "more than 2 uploads in flight: {max}");
        assert!(max >= 1);
        assert_eq!(api.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_single_slot_runs_one_at_a_time() {
        let api = Arc::new(MockApi::with_faces(1).delay(Duration::from_millis(20)));
        let max_in_flight = api.max_in_flight.clone();

        let (outcomes, _) = run_batch(api, 1, paths(4)).await;

        assert_eq!(outcomes.len(), 4);
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failures_do_not_stop_siblings() {
        let api = Arc::new(MockApi {
            failing_paths: vec!["img_1.jpg".to_string()],
            ..MockApi::with_faces(1)
        });

        let (outcomes, summary) = run_batch(api.clone(), 3, paths(4)).await;

        assert_eq!(summary, BatchSummary { succeeded: 3, failed: 1 });
        assert_eq!(outcomes.len(), 4);
        let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].path, PathBuf::from("img_1.jpg"));
        assert_eq!(api.detect_calls.load(Ordering::SeqCst), 4);
        assert_eq!(api.add_face_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_face_count_errors_are_per_file() {
        let api = Arc::new(MockApi::with_faces(2));

        let (outcomes, summary) = run_batch(api.clone(), 2, paths(3)).await;

        assert_eq!(summary, BatchSummary { succeeded: 0, failed: 3 });
        assert!(outcomes
            .iter()
            .all(|o| matches!(o.result, Err(EnrollError::TooManyFaces(2)))));
        assert_eq!(api.add_face_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let api = Arc::new(MockApi::with_faces(1));
        let (outcomes, summary) = run_batch(api.clone(), 3, Vec::new()).await;
        assert!(outcomes.is_empty());
        assert_eq!(summary, BatchSummary::default());
        assert_eq!(api.detect_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_concurrency_raised_to_one() {
        let uploader = BatchUploader::new(Arc::new(MockApi::default()), 0);
        assert_eq!(uploader.concurrency(), 1);
    }

    #[test]
    fn test_from_config_uses_concurrent_requests() {
        let config = FaceppConfig {
            concurrent_requests: Some("5".to_string()),
            ..FaceppConfig::default()
        };
        let uploader = BatchUploader::from_config(Arc::new(MockApi::default()), &config).unwrap();
        assert_eq!(uploader.concurrency(), 5);

        let defaulted =
            BatchUploader::from_config(Arc::new(MockApi::default()), &FaceppConfig::default())
                .unwrap();
        assert_eq!(defaulted.concurrency(), 3);
    }

    #[test]
    fn test_from_config_rejects_bad_concurrency() {
        let config = FaceppConfig {
            concurrent_requests: Some("lots".to_string()),
            ..FaceppConfig::default()
        };
        let err = BatchUploader::from_config(Arc::new(MockApi::default()), &config)
            .err()
            .unwrap();
        assert!(matches!(err, BatchError::Config(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_expand_glob_sorted_matches() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.jpg", "c.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let pattern = format!("{}/*.jpg", dir.path().display());
        let matched = expand_glob(&pattern).unwrap();
        assert_eq!(
            matched,
            vec![dir.path().join("a.jpg"), dir.path().join("b.jpg")]
        );
    }

    #[test]
    fn test_expand_glob_plain_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.jpg");
        std::fs::write(&file, b"x").unwrap();

        let matched = expand_glob(&file.display().to_string()).unwrap();
        assert_eq!(matched, vec![file]);
    }

    #[test]
    fn test_expand_glob_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.jpg", dir.path().display());
        assert!(expand_glob(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_expand_glob_invalid_pattern() {
        let err = expand_glob("photos/[a-").unwrap_err();
        assert!(matches!(err, BatchError::Pattern(_)));
    }
}
