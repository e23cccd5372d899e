//! CLI command implementations

use std::fs;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::import::{run_import, SequenceGenerator};
use crate::observability::Logger;
use crate::storage::RecordStore;

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&Config::load(&config)?),
        Command::Serve { config } => serve(Config::load(&config)?),
        Command::Import {
            config,
            csv,
            first_id,
        } => {
            let config = Config::load(&config)?;
            let text = fs::read_to_string(&csv).map_err(|e| {
                CliError::io_error(format!("Failed to read {}: {}", csv.display(), e))
            })?;
            import(&config, &text, SequenceGenerator::starting_at(first_id))
        }
    }
}

/// Create an empty collection document if none exists
pub fn init(config: &Config) -> CliResult<()> {
    let store = RecordStore::open_file(&config.data_file);
    let created = store.init()?;

    let path = config.data_file.display().to_string();
    Logger::info(
        "INIT_COMPLETE",
        &[
            ("created", if created { "true" } else { "false" }),
            ("data_file", path.as_str()),
        ],
    );
    Ok(())
}

/// Boot the HTTP server on a fresh runtime and block until it stops
pub fn serve(config: Config) -> CliResult<()> {
    let store = RecordStore::open_file(&config.data_file);
    // Fail at boot rather than on the first request
    store.load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::serve_failed(format!("Failed to start runtime: {}", e)))?;

    let server = HttpServer::new(store, config.http);
    runtime.block_on(server.start()).map_err(|e| {
        let reason = e.to_string();
        Logger::fatal("SERVER_FAILED", &[("reason", reason.as_str())]);
        CliError::serve_failed(reason)
    })
}

/// Replace the collection with the rows of `csv_text`
pub fn import(config: &Config, csv_text: &str, mut sequence: SequenceGenerator) -> CliResult<()> {
    let store = RecordStore::open_file(&config.data_file);
    let report = run_import(&store, csv_text, &mut sequence, &config.import_options())?;

    let imported = report.imported.to_string();
    let no_image = report.skipped_missing_image.to_string();
    let invalid = report.skipped_invalid.to_string();
    let next_id = sequence.peek().to_string();
    Logger::info(
        "IMPORT_REPORT",
        &[
            ("imported", imported.as_str()),
            ("next_id", next_id.as_str()),
            ("skipped_invalid", invalid.as_str()),
            ("skipped_missing_image", no_image.as_str()),
        ],
    );
    Ok(())
}
