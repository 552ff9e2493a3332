use super::error::RoastError;
use crate::analysis::prelude::{
    AnalysisClient, AnalysisError, AnalysisResult, DEFAULT_BASE_URL, DEFAULT_MODEL,
    GeminiProvider,
};
use crate::intake::prelude::{ImageFile, IntakeError, UploadedImage, validate_and_decode};
use crate::models::prelude::HelpMetadata;
use crate::present::prelude::{ResultView, image_summary, render_result, render_snapshot};
use crate::session::prelude::{NoticeSource, PhaseKind, SessionController};
use crate::shared::prelude::FoundConfig;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use inquire::InquireError;
use secrecy::SecretString;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;
use url::Url;

/// Older name of the key variable, still honoured.
const LEGACY_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Args)]
pub struct RoastArgs {
    /// Photo of the outfit (JPG, PNG, ...), at most 5 MB. Asked for when omitted in a terminal.
    image: Option<String>,

    /// Analyze right away and never prompt. Implied when stdin is not a terminal.
    #[arg(long, short)]
    yes: bool,

    /// Print the review as JSON instead of text.
    #[arg(long)]
    json: bool,

    #[clap(flatten)]
    service: ServiceOptions,
}

#[derive(Debug, Args)]
pub struct ServiceOptions {
    /// Gemini model that reviews the photo.
    #[arg(long, env = "KAOPEI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Gemini models API.
    #[arg(long, env = "KAOPEI_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: Url,

    /// Gemini API key. Falls back to `API_KEY`.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

impl ServiceOptions {
    fn api_key(&self) -> Option<SecretString> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(LEGACY_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
    }

    pub fn build_provider(&self) -> Result<GeminiProvider, AnalysisError> {
        let api_key = self.api_key().ok_or(AnalysisError::MissingCredential)?;
        GeminiProvider::new(api_key, self.api_base_url.clone(), &self.model)
    }
}

/// Process exit code of a `roast` run, decided by how the last step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoastExit {
    Shown,
    AnalysisFailed,
    Rejected,
}

impl RoastExit {
    pub fn code(&self) -> i32 {
        match self {
            RoastExit::Shown => 0,
            RoastExit::AnalysisFailed => 1,
            RoastExit::Rejected => 2,
        }
    }
}

enum NextStep {
    Roast,
    PickAnother,
    Quit,
}

pub async fn roast_root(found_config: &FoundConfig, args: &RoastArgs) -> Result<i32> {
    let provider = match args.service.build_provider() {
        Ok(provider) => provider,
        Err(e) => {
            error!(target: "user", "{}", e);
            return Ok(RoastExit::Rejected.code());
        }
    };

    let persona = found_config.get_persona();
    if persona.is_builtin() {
        debug!("Using the built-in persona {}", persona.full_name);
    } else {
        info!(target: "user", "Using {} from {}", persona.full_name.bold(), persona.file_path());
    }
    let client = AnalysisClient::new(Arc::new(provider), persona);

    let interactive = !args.yes && std::io::stdin().is_terminal();
    let exit = if interactive {
        run_interactive(found_config, &client, args).await?
    } else {
        run_once(found_config, &client, args).await?
    };

    Ok(exit.code())
}

async fn run_once(
    found_config: &FoundConfig,
    client: &AnalysisClient,
    args: &RoastArgs,
) -> Result<RoastExit> {
    let Some(path) = args.image.as_deref() else {
        error!(target: "user", "{}", RoastError::MissingImage);
        return Ok(RoastExit::Rejected);
    };
    let mut session = SessionController::new();

    select_image(&mut session, found_config, path).await?;
    if let Some(notice) = session.error() {
        error!(target: "user", "{}", notice.message);
        return Ok(RoastExit::Rejected);
    }
    show_preview(&session);

    analyze(&mut session, client).await;
    finish(&session, args.json)
}

async fn run_interactive(
    found_config: &FoundConfig,
    client: &AnalysisClient,
    args: &RoastArgs,
) -> Result<RoastExit> {
    let mut session = SessionController::new();
    let mut pending_path = args.image.clone();
    let mut exit = RoastExit::Shown;

    loop {
        match session.kind() {
            PhaseKind::Idle => {
                let path = match pending_path.take() {
                    Some(path) => path,
                    None => match prompt_for_path()? {
                        Some(path) => path,
                        None => break,
                    },
                };
                select_image(&mut session, found_config, &path).await?;
                exit = selection_exit(&session);
            }
            PhaseKind::Previewing => {
                show_preview(&session);
                match prompt_next_step(roast_label(&session))? {
                    NextStep::Roast => {
                        analyze(&mut session, client).await;
                        exit = finish(&session, args.json)?;
                    }
                    NextStep::PickAnother => {
                        if let Some(path) = prompt_for_path()? {
                            select_image(&mut session, found_config, &path).await?;
                            exit = selection_exit(&session);
                        }
                    }
                    NextStep::Quit => break,
                }
            }
            PhaseKind::Showing => {
                if !confirm("Next victim?")? {
                    break;
                }
                session.reset()?;
            }
            PhaseKind::Analyzing => {
                debug!("Session left in {}", session);
                break;
            }
        }
    }

    debug!("Session history {:?}", session.history());
    Ok(exit)
}

/// Reports a rejected selection. The exit code follows the latest pick only.
fn selection_exit(session: &SessionController) -> RoastExit {
    match session.error() {
        Some(notice) if notice.source == NoticeSource::Intake => {
            error!(target: "user", "{}", notice.message);
            RoastExit::Rejected
        }
        _ => RoastExit::Shown,
    }
}

/// "Try again" only makes sense after the director failed on this photo.
fn roast_label(session: &SessionController) -> &'static str {
    match session.error() {
        Some(notice) if notice.source == NoticeSource::Analysis => "Try again with this photo",
        _ => "Roast me",
    }
}

async fn select_image(
    session: &mut SessionController,
    found_config: &FoundConfig,
    path: &str,
) -> Result<PhaseKind> {
    let path = resolve_path(found_config, path);
    debug!("Loading {}", path.display());

    let selection = load_image(&path).await;
    Ok(session.apply_selection(selection)?)
}

async fn load_image(path: &std::path::Path) -> Result<UploadedImage, IntakeError> {
    let file = ImageFile::open(path).await?;
    validate_and_decode(&file).await
}

fn resolve_path(found_config: &FoundConfig, path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path.trim());
    found_config.working_dir.join(expanded.as_ref())
}

async fn analyze(session: &mut SessionController, client: &AnalysisClient) {
    let span = info_span!("analyzing", "indicatif.pb_show" = true);
    span.pb_set_message("Scanning your fashion disaster index... the director is taking a deep breath");

    let outcome = session.analyze(client).instrument(span).await;
    debug!("Analysis finished with {:?}", outcome);
}

fn finish(session: &SessionController, json: bool) -> Result<RoastExit> {
    match (session.kind(), session.image(), session.result()) {
        (PhaseKind::Showing, Some(image), Some(result)) => {
            show_result(image, result, json)?;
            Ok(RoastExit::Shown)
        }
        _ => {
            if let Some(notice) = session.error() {
                error!(target: "user", "{}", notice.message);
            }
            Ok(RoastExit::AnalysisFailed)
        }
    }
}

fn show_preview(session: &SessionController) {
    if let Some(image) = session.image() {
        info!(target: "user", "{} {}", "Preview:".bold(), image_summary(image));
    }
}

fn show_result(image: &UploadedImage, result: &AnalysisResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let view = ResultView::new(result, image);
    info!(target: "always", "{}", render_result(&view)?);
    info!(target: "always", "Capture this:\n{}", render_snapshot(&view.snapshot)?);
    Ok(())
}

fn prompt_for_path() -> Result<Option<String>, RoastError> {
    let answer = tracing_indicatif::suspend_tracing_indicatif(|| {
        inquire::Text::new("Where is your OOTD photo?")
            .with_help_message("JPG or PNG, max 5 MB. Leave empty to quit.")
            .prompt()
    });

    match answer {
        Ok(path) if path.trim().is_empty() => Ok(None),
        Ok(path) => Ok(Some(path)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn prompt_next_step(roast: &'static str) -> Result<NextStep, RoastError> {
    let options = vec![roast, "Pick another photo", "Quit"];

    let answer = tracing_indicatif::suspend_tracing_indicatif(|| {
        inquire::Select::new("Ready to be judged?", options).prompt()
    });

    match answer {
        Ok("Pick another photo") => Ok(NextStep::PickAnother),
        Ok("Quit") => Ok(NextStep::Quit),
        Ok(_) => Ok(NextStep::Roast),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(NextStep::Quit)
        }
        Err(e) => Err(e.into()),
    }
}

fn confirm(text: &str) -> Result<bool, RoastError> {
    let answer = tracing_indicatif::suspend_tracing_indicatif(|| {
        inquire::Confirm::new(text).with_default(true).prompt()
    });

    match answer {
        Ok(value) => Ok(value),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
