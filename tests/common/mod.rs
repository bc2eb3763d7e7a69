//! Test doubles shared by the integration suites.

use std::sync::Mutex;

use async_trait::async_trait;

use stockpilot::{
    csv::record::ProductRecord,
    error::ImportError,
    store::{CatalogEntry, ProductStore},
    ui::{ProgressReporter, Prompter},
};

/// Prompter with a scripted confirmation answer, recording notifications.
pub struct ScriptedPrompter {
    answer: bool,
    notifications: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _message: &str) -> bool {
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}

/// Progress reporter recording every update it receives.
#[derive(Default)]
pub struct RecordingProgress {
    updates: Mutex<Vec<(usize, usize)>>,
}

impl RecordingProgress {
    pub fn updates(&self) -> Vec<(usize, usize)> {
        self.updates.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn update(&self, current: usize, total: usize) {
        self.updates.lock().unwrap().push((current, total));
    }
}

/// Store whose writes always fail, with a readable catalog.
pub struct FailingStore;

#[async_trait]
impl ProductStore for FailingStore {
    async fn get_products(&self) -> Result<Vec<CatalogEntry>, ImportError> {
        Ok(Vec::new())
    }

    async fn save_product(&self, _record: &ProductRecord) -> Result<(), ImportError> {
        Err(ImportError::Store("write refused".to_string()))
    }
}
