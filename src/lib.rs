pub mod api;
pub mod app;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use session::SessionContext;
pub use state::AppState;
pub use storage::{load_session, resolve_session_path};
