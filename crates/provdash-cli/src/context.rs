use anyhow::{Result, bail};
use provdash_client::{ApiClient, Backend};
use provdash_runtime::{
    Action, AppState, Config, Event, Executor, NoticeLevel, Store, run_until_idle,
};
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::presentation::view_models::CommandResultViewModel;
use crate::presentation::{ConsoleRenderer, Renderer};
use crate::types::OutputFormat;

/// Everything a handler needs: resolved config plus output settings.
pub struct ExecutionContext {
    pub config: Config,
    config_path: PathBuf,
    config_exists: bool,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(config: Config, config_path: PathBuf, config_exists: bool, format: OutputFormat) -> Self {
        Self {
            config,
            config_path,
            config_exists,
            format,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_exists(&self) -> bool {
        self.config_exists
    }

    pub fn report_dir(&self) -> PathBuf {
        self.config.report_dir()
    }

    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.config.client_config())?)
    }

    /// Store wired to the HTTP backend.
    pub fn session(&self) -> Result<Session<ApiClient>> {
        Ok(Session::new(Arc::new(self.client()?), self.report_dir()))
    }

    pub fn render<T>(&self, view_model: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + Display,
    {
        let renderer = ConsoleRenderer::new(self.format == OutputFormat::Json);
        renderer.render(view_model)
    }
}

/// One-shot driver around the store for console commands.
///
/// Each call dispatches an action and waits until every effect it caused
/// (and every follow-up) has settled. Error notices raised along the way
/// become the command's error.
pub struct Session<B> {
    store: Store,
    executor: Executor<B>,
    events: UnboundedReceiver<Event>,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: Arc<B>, report_dir: PathBuf) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            store: Store::new(),
            executor: Executor::new(backend, tx, report_dir),
            events,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub async fn reload(&mut self) -> Result<()> {
        self.dispatch(Action::Reload).await
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<()> {
        self.store.dispatch(Action::DismissNotices);
        let effects = self.store.dispatch(action);
        run_until_idle(&mut self.store, &self.executor, &mut self.events, effects).await;

        let errors: Vec<&str> = self
            .store
            .state()
            .notices
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.text.as_str())
            .collect();
        if !errors.is_empty() {
            bail!("{}", errors.join("; "));
        }
        Ok(())
    }

    pub fn into_parts(self) -> (Store, Executor<B>, UnboundedReceiver<Event>) {
        (self.store, self.executor, self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provdash_client::ApiError;
    use provdash_testing::{Endpoint, FakeBackend};
    use provdash_types::ReviewAction;

    fn session(backend: FakeBackend) -> Session<FakeBackend> {
        Session::new(Arc::new(backend), PathBuf::from("."))
    }

    #[tokio::test]
    async fn test_reload_fills_state() -> Result<()> {
        let mut session = session(FakeBackend::new());
        session.reload().await?;

        assert!(session.state().stats.is_some());
        assert_eq!(session.state().providers.len(), 3);
        assert_eq!(session.state().pending_reviews.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_reload_is_an_error() {
        let backend = FakeBackend::new().failing(
            Endpoint::Stats,
            ApiError::Network("connection refused".to_string()),
        );
        let mut session = session(backend);

        let err = session.reload().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to load stats"));
        assert_eq!(session.state().providers.len(), 3);
    }

    #[tokio::test]
    async fn test_review_runs_follow_up_reload() -> Result<()> {
        let mut session = session(FakeBackend::new());
        session.reload().await?;
        session
            .dispatch(Action::Review {
                id: 1,
                action: ReviewAction::Approve,
            })
            .await?;

        assert!(session.state().pending_item(1).is_none());
        assert_eq!(session.state().pending_reviews.len(), 1);
        Ok(())
    }
}
