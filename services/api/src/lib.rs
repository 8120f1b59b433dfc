mod cli;
mod demo;
mod infra;
mod routes;
mod server;

pub use infra::AppState;
pub use routes::app_router;

use pop_atlas::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
