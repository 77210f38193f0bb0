use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use provdash_client::{Backend, Report, report_file_name};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::Result;
use crate::store::{Effect, Event, Store};

/// Runs store effects as tokio tasks against a [`Backend`].
///
/// Every spawned task sends exactly one [`Event`] back on the channel.
pub struct Executor<B> {
    backend: Arc<B>,
    events: UnboundedSender<Event>,
    report_dir: PathBuf,
}

impl<B: Backend> Executor<B> {
    pub fn new(backend: Arc<B>, events: UnboundedSender<Event>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            events,
            report_dir: report_dir.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Spawn every effect; returns how many events will come back.
    pub fn execute_all(&self, effects: Vec<Effect>) -> usize {
        effects.into_iter().map(|effect| self.execute(effect)).sum()
    }

    pub fn execute(&self, effect: Effect) -> usize {
        debug!(?effect, "executing effect");
        match effect {
            Effect::ReloadAll { seq } => {
                self.spawn(move |backend| async move { reload_all(&*backend, seq).await });
                1
            }
            Effect::LoadProvider(provider_id) => {
                self.spawn(move |backend| async move {
                    let result = backend.fetch_provider_detail(provider_id).await;
                    Event::DetailLoaded {
                        provider_id,
                        result,
                    }
                });
                self.spawn(move |backend| async move {
                    let result = backend.fetch_ocr(provider_id).await;
                    Event::OcrLoaded {
                        provider_id,
                        result,
                    }
                });
                self.spawn(move |backend| async move {
                    let result = backend.fetch_qa_history(provider_id).await;
                    Event::QaLoaded {
                        provider_id,
                        result,
                    }
                });
                3
            }
            Effect::ExplainField {
                provider_id,
                request,
            } => {
                self.spawn(move |backend| async move {
                    let result = backend.explain(&request).await;
                    Event::FieldExplained {
                        provider_id,
                        field: request.field,
                        result,
                    }
                });
                1
            }
            Effect::ExplainItem { id, request } => {
                self.spawn(move |backend| async move {
                    let result = backend.explain(&request).await;
                    Event::ItemExplained { id, result }
                });
                1
            }
            Effect::SubmitReview { id, action } => {
                self.spawn(move |backend| async move {
                    let result = backend.submit_review_action(id, &action).await;
                    Event::ReviewSubmitted { id, action, result }
                });
                1
            }
            Effect::RunBatch(kind) => {
                self.spawn(move |backend| async move {
                    Event::BatchFinished(backend.run_batch(kind).await)
                });
                1
            }
            Effect::DownloadReport => {
                let dir = self.report_dir.clone();
                self.spawn(move |backend| async move {
                    let result = match backend.download_report().await {
                        Ok(report) => save_report(&report, &dir, Local::now().date_naive()).await,
                        Err(err) => Err(err.into()),
                    };
                    Event::ReportSaved(result)
                });
                1
            }
        }
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Arc<B>) -> Fut,
        Fut: Future<Output = Event> + Send + 'static,
    {
        let future = task(Arc::clone(&self.backend));
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = future.await;
            if events.send(event).is_err() {
                debug!("event loop closed; dropping result");
            }
        });
    }
}

/// Fetch the three top-level collections concurrently and wait for all
/// of them; each result is reported independently.
pub async fn reload_all<B: Backend>(backend: &B, seq: u64) -> Event {
    let (stats, providers, reviews) = tokio::join!(
        backend.fetch_stats(),
        backend.fetch_providers(),
        backend.fetch_pending_reviews()
    );
    Event::Reloaded {
        seq,
        stats,
        providers,
        reviews,
    }
}

/// Write `report` into `dir` as `validation_report_<date>.pdf`.
pub async fn save_report(report: &Report, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(report_file_name(date));
    tokio::fs::write(&path, &report.bytes).await?;
    info!(path = %path.display(), bytes = report.len(), "saved report");
    Ok(path)
}

/// Execute `effects` and keep applying their events (and any follow-up
/// effects) until nothing is outstanding.
///
/// Used by one-shot console commands; the TUI runs its own loop.
pub async fn run_until_idle<B: Backend>(
    store: &mut Store,
    executor: &Executor<B>,
    events: &mut UnboundedReceiver<Event>,
    effects: Vec<Effect>,
) {
    let mut outstanding = executor.execute_all(effects);
    while outstanding > 0 {
        let Some(event) = events.recv().await else {
            break;
        };
        outstanding -= 1;
        let follow_up = store.apply(event);
        outstanding += executor.execute_all(follow_up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_report_names_file_by_date() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path().join("reports");
        let report = Report::new(b"%PDF-1.7".to_vec(), None);
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let path = save_report(&report, &dir, date).await?;
        assert_eq!(path, dir.join("validation_report_2026-10-16.pdf"));
        assert_eq!(std::fs::read(&path)?, b"%PDF-1.7".to_vec());
        Ok(())
    }
}
