pub mod app;
pub mod config;
pub mod dom;
pub mod errors;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod poller;
pub mod source;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::{PollerConfig, ServerConfig};
pub use dom::{Document, Page};
pub use errors::FetchError;
pub use poller::{InsightPoller, RefreshHandle};
pub use source::{HttpInsightSource, InsightSource};
pub use state::AppState;
