use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use student_app::{draw, run_session, AppResult, Config, SessionOptions, UreqTransport};
use student_core::{Notifier, StudentApi, StudentClient, SyncController};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };
    let local = tokio::task::LocalSet::new();

    match local.block_on(&runtime, run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "session ended with error");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> AppResult<()> {
    info!(base_url = %config.base_url, "starting");
    let api = StudentApi::new(
        StudentClient::new(&config.base_url),
        UreqTransport::new(config.timeout()),
    );
    let controller = Rc::new(SyncController::with_notifier(
        api,
        Notifier::new(config.notification_ttl()),
    ));
    let out = Rc::new(RefCell::new(std::io::stdout()));
    let options = SessionOptions {
        refresh_period: config.refresh_period(),
        html_out: config.html_out.clone(),
    };

    // The roster is always rebuilt from an initial fetch.
    let _ = controller.refresh().await;
    draw(&controller, &out, &options);

    run_session(controller, BufReader::new(tokio::io::stdin()), out, options).await
}
