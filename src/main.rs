use competency_match::config::LoggingSettings;
use competency_match::{dispatch, Matcher, Settings};
use std::io::Read;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Read a match request from the file named on the command line, or stdin
fn read_request() -> std::io::Result<String> {
    match std::env::args().nth(1).filter(|arg| arg != "-") {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over LOG_LEVEL; logs go to stderr so stdout stays JSON
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = match std::env::var("COMPETENCY_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    };

    let settings = match loaded {
        Ok(settings) => {
            init_logging(&settings.logging);
            info!("Configuration loaded successfully");
            settings
        }
        Err(e) => {
            let settings = Settings::default();
            init_logging(&settings.logging);
            warn!("Failed to load configuration ({}), using built-in defaults", e);
            settings
        }
    };

    info!("Matcher initialized with config: {:?}", settings.matching);

    let matcher = Matcher::new(settings.matching);

    let body = match read_request() {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read match request: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (response, ok) = dispatch::handle_json(&matcher, &body);
    println!("{}", response);

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
