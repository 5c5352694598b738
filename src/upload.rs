// SPDX-License-Identifier: MPL-2.0
//! Batch photo upload pipeline.
//!
//! Uploads a batch of files strictly one at a time and blends the per-file
//! transfer percentages into a single 0-100 value for the whole batch.
//! Serializing the uploads bounds concurrent bandwidth and keeps the
//! progress math simple; the trade-off is throughput on large batches.
//!
//! The pipeline talks to the service through the [`UploadTransport`] seam
//! so tests can script transports without a network.

use crate::api::photos::{self, UploadFile};
use crate::api::ApiClient;
use crate::error::Result;
use std::future::Future;

/// Uploads one file and reports its own 0-100 percent as it transfers.
pub trait UploadTransport {
    fn upload_photo(
        &self,
        file: &UploadFile,
        on_progress: impl FnMut(u8) + Send,
    ) -> impl Future<Output = Result<i64>> + Send;
}

impl UploadTransport for ApiClient {
    fn upload_photo(
        &self,
        file: &UploadFile,
        on_progress: impl FnMut(u8) + Send,
    ) -> impl Future<Output = Result<i64>> + Send {
        photos::upload_photo(self, file, on_progress)
    }
}

/// Blends one file's percent into the whole-batch percent.
///
/// With `total` files and the file at zero-based `index` reporting
/// `percent`, the batch is at `round(((index + percent/100) / total) * 100)`.
/// The value never decreases across the batch as long as each file's own
/// percent never decreases; per-file regressions are passed through as-is.
pub fn batch_percent(index: usize, total: usize, percent: u8) -> u8 {
    (((index as f64 + f64::from(percent) / 100.0) / total as f64) * 100.0).round() as u8
}

/// Uploads `files` in order, one at a time, and returns their identifiers
/// in the same order.
///
/// The first failure rejects the whole batch: files after it are never
/// attempted and no identifiers are returned. `on_progress` receives the
/// blended batch percent on every per-file progress event.
pub async fn upload_photos<T: UploadTransport>(
    transport: &T,
    files: &[UploadFile],
    mut on_progress: impl FnMut(u8) + Send,
) -> Result<Vec<i64>> {
    let total = files.len();
    let mut ids = Vec::with_capacity(total);

    for (index, file) in files.iter().enumerate() {
        let id = transport
            .upload_photo(file, |percent| {
                on_progress(batch_percent(index, total, percent));
            })
            .await?;
        ids.push(id);
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// What the scripted transport does for one file.
    struct Outcome {
        progress: Vec<u8>,
        result: Result<i64>,
    }

    /// Events a test can assert call ordering on.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Started(usize),
        Settled(usize),
    }

    struct ScriptedTransport {
        outcomes: Vec<Outcome>,
        next_call: AtomicUsize,
        events: Mutex<Vec<Event>>,
    }

    impl ScriptedTransport {
        fn new(outcomes: Vec<Outcome>) -> Self {
            Self {
                outcomes,
                next_call: AtomicUsize::new(0),
                events: Mutex::new(Vec::new()),
            }
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().expect("events lock").clone()
        }

        fn call_count(&self) -> usize {
            self.next_call.load(Ordering::SeqCst)
        }
    }

    impl UploadTransport for ScriptedTransport {
        fn upload_photo(
            &self,
            _file: &UploadFile,
            mut on_progress: impl FnMut(u8) + Send,
        ) -> impl Future<Output = Result<i64>> + Send {
            let call = self.next_call.fetch_add(1, Ordering::SeqCst);
            async move {
                self.events
                    .lock()
                    .expect("events lock")
                    .push(Event::Started(call));

                let outcome = &self.outcomes[call];
                for &percent in &outcome.progress {
                    on_progress(percent);
                }
                // Yield so an (incorrectly) concurrent second upload would
                // interleave its Started event before this Settled.
                tokio::task::yield_now().await;

                self.events
                    .lock()
                    .expect("events lock")
                    .push(Event::Settled(call));
                outcome.result.clone()
            }
        }
    }

    fn file(name: &str) -> UploadFile {
        UploadFile::new(name, vec![0u8; 4])
    }

    #[test]
    fn batch_percent_blends_per_file_progress() {
        // Two files: halfway through the first is a quarter of the batch.
        assert_eq!(batch_percent(0, 2, 0), 0);
        assert_eq!(batch_percent(0, 2, 50), 25);
        assert_eq!(batch_percent(1, 2, 0), 50);
        assert_eq!(batch_percent(1, 2, 100), 100);
    }

    #[test]
    fn batch_percent_rounds_to_nearest() {
        // Three files: completing the first is 33.33..% of the batch.
        assert_eq!(batch_percent(0, 3, 100), 33);
        assert_eq!(batch_percent(1, 3, 0), 33);
        assert_eq!(batch_percent(2, 3, 50), 83);
    }

    #[tokio::test]
    async fn uploads_every_file_and_returns_ids_in_order() {
        let transport = ScriptedTransport::new(vec![
            Outcome {
                progress: vec![100],
                result: Ok(11),
            },
            Outcome {
                progress: vec![100],
                result: Ok(22),
            },
            Outcome {
                progress: vec![100],
                result: Ok(33),
            },
        ]);
        let files = vec![file("a.png"), file("b.png"), file("c.png")];

        let ids = upload_photos(&transport, &files, |_| {})
            .await
            .expect("batch should succeed");
        assert_eq!(ids, vec![11, 22, 33]);
    }

    #[tokio::test]
    async fn uploads_are_strictly_sequential() {
        let transport = ScriptedTransport::new(vec![
            Outcome {
                progress: vec![50, 100],
                result: Ok(1),
            },
            Outcome {
                progress: vec![100],
                result: Ok(2),
            },
        ]);
        let files = vec![file("a.png"), file("b.png")];

        upload_photos(&transport, &files, |_| {})
            .await
            .expect("batch should succeed");

        // The second upload must not start before the first has settled.
        assert_eq!(
            transport.events(),
            vec![
                Event::Started(0),
                Event::Settled(0),
                Event::Started(1),
                Event::Settled(1),
            ]
        );
    }

    #[tokio::test]
    async fn aggregate_progress_spans_the_whole_batch() {
        let transport = ScriptedTransport::new(vec![
            Outcome {
                progress: vec![50, 100],
                result: Ok(1),
            },
            Outcome {
                progress: vec![0, 100],
                result: Ok(2),
            },
        ]);
        let files = vec![file("a.png"), file("b.png")];

        let mut seen = Vec::new();
        upload_photos(&transport, &files, |percent| seen.push(percent))
            .await
            .expect("batch should succeed");

        assert_eq!(seen, vec![25, 50, 50, 100]);
    }

    #[tokio::test]
    async fn first_failure_rejects_batch_and_skips_the_rest() {
        let transport = ScriptedTransport::new(vec![
            Outcome {
                progress: vec![100],
                result: Ok(1),
            },
            Outcome {
                progress: vec![10],
                result: Err(Error::Api("Failed to upload photo".to_string())),
            },
            Outcome {
                progress: vec![],
                result: Ok(3),
            },
        ]);
        let files = vec![file("a.png"), file("b.png"), file("c.png")];

        let err = upload_photos(&transport, &files, |_| {})
            .await
            .expect_err("batch should fail");
        assert_eq!(err, Error::Api("Failed to upload photo".to_string()));

        // The failing file settled the batch; the third was never attempted.
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn server_message_survives_to_the_caller() {
        let transport = ScriptedTransport::new(vec![Outcome {
            progress: vec![],
            result: Err(Error::Api("quota exceeded".to_string())),
        }]);
        let files = vec![file("a.png")];

        let err = upload_photos(&transport, &files, |_| {})
            .await
            .expect_err("batch should fail");
        assert_eq!(err, Error::Api("quota exceeded".to_string()));
    }

    #[tokio::test]
    async fn empty_batch_resolves_without_progress_events() {
        let transport = ScriptedTransport::new(Vec::new());

        let mut seen = Vec::new();
        let ids = upload_photos(&transport, &[], |percent| seen.push(percent))
            .await
            .expect("empty batch should succeed");

        assert!(ids.is_empty());
        assert!(seen.is_empty());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn per_file_regressions_pass_through_unguarded() {
        // The transport may replay earlier byte counts (e.g. retried
        // chunks); the blend reflects them rather than clamping.
        let transport = ScriptedTransport::new(vec![Outcome {
            progress: vec![30, 10, 100],
            result: Ok(1),
        }]);
        let files = vec![file("a.png")];

        let mut seen = Vec::new();
        upload_photos(&transport, &files, |percent| seen.push(percent))
            .await
            .expect("batch should succeed");

        assert_eq!(seen, vec![30, 10, 100]);
    }
}
