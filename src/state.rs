use crate::models::ConsumptionReading;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Readings recorded since startup, oldest first. Memory only.
#[derive(Clone, Default)]
pub struct AppState {
    pub readings: Arc<Mutex<Vec<ConsumptionReading>>>,
}

impl AppState {
    pub fn new(readings: Vec<ConsumptionReading>) -> Self {
        Self {
            readings: Arc::new(Mutex::new(readings)),
        }
    }

    pub async fn latest(&self) -> Option<ConsumptionReading> {
        self.readings.lock().await.last().cloned()
    }
}
