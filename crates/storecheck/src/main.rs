mod error;
mod logging;
mod presenter;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use log::{debug, error};
use storecheck_core::{
    CheckConfig, ErrorKind, HttpChannelClient, InstalledVersionInfo, JsonMetadataFile,
    UpdateChecker, UpdateDecision, UpdatePresenter, UpdatePrompt,
};
use storecheck_platform::AppPaths;

use crate::error::AppError;
use crate::presenter::ConsolePresenter;
use crate::settings::AppSettings;

#[tokio::main]
async fn main() -> ExitCode {
    let paths = AppPaths::new().ok();
    let settings = paths
        .as_ref()
        .map(|paths| AppSettings::load(&paths.settings_file()))
        .unwrap_or_default();

    if let Some(paths) = &paths {
        logging::init_logging(paths, settings.debug_logging, settings.max_log_size_bytes);
    }

    let metadata_file = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.metadata_file.clone());

    match run(&settings, metadata_file, paths.as_ref()).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("storecheck: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    settings: &AppSettings,
    metadata_file: Option<PathBuf>,
    paths: Option<&AppPaths>,
) -> Result<ExitCode, AppError> {
    let Some(metadata_file) = metadata_file else {
        return Err(AppError::MetadataFileNotConfigured {
            settings: paths.map_or_else(
                || "settings.json".to_string(),
                |p| p.settings_file().display().to_string(),
            ),
        });
    };

    let metadata =
        JsonMetadataFile::load(&metadata_file).map_err(|source| AppError::MetadataFile {
            path: metadata_file.clone(),
            source,
        })?;

    let installed = match InstalledVersionInfo::read(&metadata) {
        Ok(installed) => installed,
        Err(e) => {
            let decision = UpdateDecision::from(e);
            return Ok(report(&decision, "", settings, &stdout_presenter(settings)));
        }
    };
    debug!(
        "Installed {} {} ({})",
        installed.display_name, installed.version, installed.bundle_identifier
    );

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http_timeout_secs))
        .build()
        .map_err(AppError::HttpClient)?;
    let checker = UpdateChecker::new(HttpChannelClient::new(http_client, settings.endpoints()));

    let config = CheckConfig::for_installed(settings.channel, &installed)
        .with_mandatory(settings.mandatory)
        .with_credential(settings.credential.clone())
        .with_ordering(settings.ordering);

    let decision = checker.check(&config).await;
    Ok(report(
        &decision,
        &installed.display_name,
        settings,
        &stdout_presenter(settings),
    ))
}

fn stdout_presenter(settings: &AppSettings) -> ConsolePresenter<std::io::Stdout> {
    ConsolePresenter::new(std::io::stdout(), settings.open_download_url)
}

fn report(
    decision: &UpdateDecision,
    display_name: &str,
    settings: &AppSettings,
    presenter: &impl UpdatePresenter,
) -> ExitCode {
    match decision {
        UpdateDecision::UpToDate => {
            println!("{display_name} is up to date");
            ExitCode::SUCCESS
        }
        UpdateDecision::UpdateAvailable { .. } => {
            if let Some(prompt) = UpdatePrompt::from_decision(decision, display_name, settings.channel)
            {
                presenter.present_update_prompt(&prompt);
            }
            ExitCode::SUCCESS
        }
        UpdateDecision::LookupFailed {
            reason: ErrorKind::NotFound,
            message,
        } => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        UpdateDecision::LookupFailed { message, .. } => {
            eprintln!("storecheck: {message}");
            ExitCode::FAILURE
        }
    }
}
