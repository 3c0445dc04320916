mod config;
mod error;
mod requests_logging;
mod server;
mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use requests_logging::{RequestsLoggingLevel, log_requests};
pub use server::run_server;
pub use state::{RecordSource, ServerState};
