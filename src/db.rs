use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::errors::ServiceError;

const APP_NAME: &str = "ecommerce-backend";

/// Builds a MongoDB client from the configured connection string.
///
/// The driver connects lazily, so success here only means the connection
/// string was understood. Use [`ping`] to reach the server.
///
/// # Errors
/// Returns `ServiceError::Database` if the connection string cannot be parsed
pub async fn connect(cfg: &AppConfig) -> Result<Database, ServiceError> {
    let mut options = ClientOptions::parse(cfg.database_url()).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(cfg.server_selection_timeout());
    debug!(hosts = ?options.hosts, "Configured MongoDB client");

    let client = Client::with_options(options)?;
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(&cfg.database_name));

    Ok(database)
}

/// Round-trips a `ping` command to the server.
pub async fn ping(database: &Database) -> Result<(), ServiceError> {
    database.run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}

/// Startup connection attempt. Failures are logged and never abort startup.
///
/// Returns the database handle when the connection string is usable; the
/// reachability check runs in the background so the listener is not held up
/// by server selection.
pub async fn bootstrap(cfg: &AppConfig) -> Option<Database> {
    match connect(cfg).await {
        Ok(database) => {
            let handle = database.clone();
            tokio::spawn(async move {
                match ping(&handle).await {
                    Ok(()) => info!(database = %handle.name(), "MongoDB connected"),
                    Err(e) => error!(error = %e, "MongoDB connection error"),
                }
            });
            Some(database)
        }
        Err(e) => {
            error!(error = %e, "MongoDB connection error");
            None
        }
    }
}
