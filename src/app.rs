//! Top-level application controller.
//!
//! Replaces the global mutable view state of the original front end with an
//! explicit controller that owns the active view name and a registry of view
//! collaborators. View rendering itself stays outside the core; the
//! controller only needs the `{init, refresh, is_initialized}` capability
//! set.

use std::{collections::HashMap, path::Path, time::Duration};

use async_trait::async_trait;
use log::debug;

use crate::{
    core::import::{CatalogFetchPolicy, ImportJobBuilder, ImportStatus, ImportSummary},
    csv::parser::{ProductCsvParser, ProductCsvParserBuilder},
    error::ImportError,
    store::ProductStore,
    ui::{ProgressReporter, Prompter},
};

/// The navigable views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    Dashboard,
    Products,
    Movements,
    Reports,
    Settings,
}

/// A view collaborator.
///
/// `refresh` must re-render from the store without arguments and return once
/// rendering is stable.
#[async_trait]
pub trait View: Send {
    async fn init(&mut self) -> Result<(), ImportError>;

    async fn refresh(&mut self) -> Result<(), ImportError>;

    fn is_initialized(&self) -> bool;
}

/// Application controller owning the active view and the import pipeline
/// configuration.
pub struct App<'a> {
    store: &'a dyn ProductStore,
    prompter: &'a dyn Prompter,
    progress: &'a dyn ProgressReporter,
    parser: ProductCsvParser,
    fetch_policy: CatalogFetchPolicy,
    call_timeout: Option<Duration>,
    current_view: ViewName,
    views: HashMap<ViewName, Box<dyn View>>,
}

impl<'a> App<'a> {
    /// Creates a controller showing the dashboard, with no registered views.
    pub fn new(
        store: &'a impl ProductStore,
        prompter: &'a impl Prompter,
        progress: &'a impl ProgressReporter,
    ) -> App<'a> {
        App {
            store,
            prompter,
            progress,
            parser: ProductCsvParserBuilder::new().build(),
            fetch_policy: CatalogFetchPolicy::default(),
            call_timeout: None,
            current_view: ViewName::Dashboard,
            views: HashMap::new(),
        }
    }

    pub fn fetch_policy(mut self, fetch_policy: CatalogFetchPolicy) -> Self {
        self.fetch_policy = fetch_policy;
        self
    }

    /// Per-call deadline applied to every remote store call of an import.
    pub fn call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = Some(call_timeout);
        self
    }

    /// CSV field delimiter used by the import entry points.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.parser = ProductCsvParserBuilder::new().delimiter(delimiter).build();
        self
    }

    pub fn register_view(&mut self, name: ViewName, view: Box<dyn View>) {
        self.views.insert(name, view);
    }

    pub fn current_view(&self) -> ViewName {
        self.current_view
    }

    /// Makes `view` the active view and brings its module up to date:
    /// first activation initializes it, later ones refresh it.
    pub async fn switch_view(&mut self, view: ViewName) -> Result<(), ImportError> {
        debug!("switching view to {view:?}");
        self.current_view = view;

        if let Some(module) = self.views.get_mut(&view) {
            if module.is_initialized() {
                module.refresh().await?;
            } else {
                module.init().await?;
            }
        }

        Ok(())
    }

    /// Imports products from a CSV file on disk.
    ///
    /// The filename must end in `.csv`; there is no content sniffing. The
    /// file is decoded as UTF-8 with no auto-detection. A read failure is
    /// fatal to the batch and creates no partial state.
    pub async fn import_csv_file(&mut self, path: &Path) -> Result<ImportSummary, ImportError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        if !file_name.ends_with(".csv") {
            return Err(ImportError::UnsupportedFile(file_name));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ImportError::FileRead(err.to_string()))?;
        let text = String::from_utf8_lossy(&bytes);

        let stem = file_name.trim_end_matches(".csv").to_string();
        self.import_csv_text(&text, Some(stem)).await
    }

    /// Imports products from an already-decoded CSV text.
    pub async fn import_csv_text(
        &mut self,
        text: &str,
        name: Option<String>,
    ) -> Result<ImportSummary, ImportError> {
        let records = self.parser.parse(text);

        let mut builder = ImportJobBuilder::new()
            .store(self.store)
            .prompter(self.prompter)
            .progress(self.progress)
            .fetch_policy(self.fetch_policy);
        if let Some(name) = name {
            builder = builder.name(name);
        }
        if let Some(call_timeout) = self.call_timeout {
            builder = builder.call_timeout(call_timeout);
        }

        let summary = builder.build().run(records).await?;

        // Keep the catalog on screen in sync, but only when it is on screen.
        if summary.status == ImportStatus::Completed && self.current_view == ViewName::Products {
            if let Some(view) = self.views.get_mut(&ViewName::Products) {
                view.refresh().await?;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;

    use crate::{
        error::ImportError,
        store::memory::InMemoryStore,
        ui::{LogProgress, Prompter},
    };

    use super::{App, View, ViewName};

    struct AcceptAll;

    impl Prompter for AcceptAll {
        fn confirm(&self, _message: &str) -> bool {
            true
        }

        fn notify(&self, _message: &str) {}
    }

    #[derive(Default)]
    struct CountingView {
        inits: Arc<AtomicUsize>,
        refreshes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl View for CountingView {
        async fn init(&mut self) -> Result<(), ImportError> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn refresh(&mut self) -> Result<(), ImportError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn is_initialized(&self) -> bool {
            self.inits.load(Ordering::SeqCst) > 0
        }
    }

    fn counting_view() -> (CountingView, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let view = CountingView::default();
        (
            CountingView {
                inits: view.inits.clone(),
                refreshes: view.refreshes.clone(),
            },
            view.inits,
            view.refreshes,
        )
    }

    const CSV: &str = "Référence,Désignation\nREF-001,Clavier";

    #[tokio::test]
    async fn switching_initializes_then_refreshes_the_view() {
        let store = InMemoryStore::new();
        let prompter = AcceptAll;
        let progress = LogProgress;
        let mut app = App::new(&store, &prompter, &progress);
        let (view, inits, refreshes) = counting_view();
        app.register_view(ViewName::Movements, Box::new(view));

        app.switch_view(ViewName::Movements).await.unwrap();
        app.switch_view(ViewName::Movements).await.unwrap();

        assert_eq!(app.current_view(), ViewName::Movements);
        assert_eq!(inits.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(refreshes.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completed_import_refreshes_the_active_products_view() {
        let store = InMemoryStore::new();
        let prompter = AcceptAll;
        let progress = LogProgress;
        let mut app = App::new(&store, &prompter, &progress);
        let (view, _inits, refreshes) = counting_view();
        app.register_view(ViewName::Products, Box::new(view));
        app.switch_view(ViewName::Products).await.unwrap();

        app.import_csv_text(CSV, None).await.unwrap();

        assert_eq!(refreshes.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn import_does_not_refresh_an_inactive_products_view() {
        let store = InMemoryStore::new();
        let prompter = AcceptAll;
        let progress = LogProgress;
        let mut app = App::new(&store, &prompter, &progress);
        let (view, _inits, refreshes) = counting_view();
        app.register_view(ViewName::Products, Box::new(view));

        app.import_csv_text(CSV, None).await.unwrap();

        assert_eq!(app.current_view(), ViewName::Dashboard);
        assert_eq!(refreshes.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_csv_file_is_rejected_before_any_read() {
        let store = InMemoryStore::new();
        let prompter = AcceptAll;
        let progress = LogProgress;
        let mut app = App::new(&store, &prompter, &progress);

        let result = app.import_csv_file("products.txt".as_ref()).await;

        assert!(matches!(result, Err(ImportError::UnsupportedFile(_))));
    }
}
