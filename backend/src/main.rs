use std::fs::File;

use backend::config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Log lines carry file and line like the rest of our services. When
// LOG_FILE_PATH is set the subscriber appends to that file instead of
// stderr, without ANSI colors.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    match &config.log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .expect("Failed to open log file");
            builder
                .with_writer(move || file.try_clone().expect("Failed to clone log file handle"))
                .with_ansi(false)
                .init();
        }
        None => builder.init(),
    }
}

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let config = AppConfig::from_env();
    init_logging(&config);

    info!("🚀 Starting prospect extraction API");
    let _ = backend::rocket(config).launch().await?;

    Ok(())
}
