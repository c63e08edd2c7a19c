pub mod config;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod upstream;

pub use errors::GatewayError;
pub use routes::router;
pub use state::AppState;
pub use upstream::UpstreamClient;
