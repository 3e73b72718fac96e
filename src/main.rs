use classification_client::impl_fake::ClassificationClientFake;
use classification_client::impl_http::ClassificationClientHttp;
use classification_client::interface::ClassificationClient;
use clap::Parser;
use config::Config;
use file_intake::interface::CandidateFile;
use interaction::controller::InteractionController;
use interaction::core::Msg;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use preview_store::impl_temp_dir::PreviewStoreTempDir;
use screen::impl_console::ScreenConsole;
use screen::impl_gui::ScreenGui;
use screen::interface::Screen;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod classification_client;
mod config;
mod error_classifier;
mod file_intake;
mod interaction;
mod library;
mod preview_store;
mod result_presenter;
mod screen;

#[derive(Parser)]
#[command(author, version, about = "Classify vehicle images with a remote classifier")]
struct Args {
    /// Image to classify in a console session
    #[arg(required_unless_present = "gui")]
    image: Option<PathBuf>,
    /// Open the drag-and-drop window instead of the console session
    #[arg(long, default_value_t = false)]
    gui: bool,
    /// Answer with a local fake classifier instead of the HTTP service
    #[arg(long, default_value_t = false)]
    fake: bool,
    /// Base URL of the classification service (overrides VEHICLE_CLASSIFIER_API_URL)
    #[arg(long)]
    api_url: Option<String>,
    /// Request timeout in seconds (overrides VEHICLE_CLASSIFIER_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn load_config(args: &Args) -> Result<Config, BoxError> {
    let mut config = Config::from_env()?;
    if let Some(api_url) = &args.api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout =
            config::parse_timeout("--timeout-secs", &secs.to_string())?;
    }
    Ok(config)
}

fn classification_client(
    args: &Args,
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ClassificationClient + Send + Sync>, BoxError> {
    if args.fake {
        return Ok(Arc::new(
            ClassificationClientFake::new(logger).with_latency(Duration::from_secs(1)),
        ));
    }
    Ok(Arc::new(ClassificationClientHttp::new(config, logger)?))
}

/// Select, classify, wait, tear down. Returns whether a prediction came back.
fn run_console(controller: &InteractionController, image: &Path) -> Result<bool, BoxError> {
    let candidate = CandidateFile::from_path(image)
        .map_err(|e| format!("could not read {}: {}", image.display(), e))?;

    controller.dispatch(Msg::SelectFile(Some(candidate)));

    if controller.model().can_classify() {
        controller.dispatch(Msg::Classify);
        while controller.model().is_loading() {
            controller.process_next()?;
        }
    }

    let succeeded = controller.model().result().is_some();
    controller.teardown();
    Ok(succeeded)
}

fn run_gui(controller: &InteractionController, screen: &ScreenGui) -> Result<(), BoxError> {
    let runner = {
        let controller = controller.clone();
        std::thread::spawn(move || controller.run())
    };

    let window_result = screen.run_window(controller.sender());

    // Tear down even when the window failed to open.
    let _ = controller.sender().send(Msg::Teardown);
    match runner.join() {
        Ok(result) => result?,
        Err(_) => return Err("controller thread panicked".into()),
    }

    window_result
}

fn run(args: Args) -> Result<ExitCode, BoxError> {
    let config = load_config(&args)?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));
    logger.info(&format!(
        "classifier endpoint {} (timeout {:?})",
        config.predict_endpoint(),
        config.request_timeout
    ))?;

    let preview_store = Arc::new(PreviewStoreTempDir::new(&config.preview_dir, logger.clone())?);
    let client = classification_client(&args, &config, logger.clone())?;

    if args.gui {
        let screen = ScreenGui::new(logger.clone());
        let screen_handle: Arc<Mutex<dyn Screen + Send + Sync>> =
            Arc::new(Mutex::new(screen.clone()));
        let controller = InteractionController::new(logger, preview_store, client, screen_handle);
        run_gui(&controller, &screen)?;
        return Ok(ExitCode::SUCCESS);
    }

    let image = match &args.image {
        Some(image) => image,
        None => return Err("an image path is required without --gui".into()),
    };

    let screen: Arc<Mutex<dyn Screen + Send + Sync>> = Arc::new(Mutex::new(ScreenConsole::new()));
    let controller = InteractionController::new(logger, preview_store, client, screen);

    if run_console(&controller, image)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
