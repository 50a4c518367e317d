pub mod app;
pub mod config;
pub mod cookies;
pub mod counter;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod periods;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use counter::{peek_counts, record_visit};
pub use models::ViewCounts;
pub use state::AppState;
pub use store::{KvStore, MemoryStore};
