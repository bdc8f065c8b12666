mod cli;
mod cors;
mod infra;
mod routes;
mod score;
mod server;

use gradecast::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
