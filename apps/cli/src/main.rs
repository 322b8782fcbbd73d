use std::{
    io::IsTerminal,
    path::{Path, PathBuf},
    process::ExitCode,
};

mod config;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{PredictClient, SelectedFile};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::load_settings;
use controller::{SubmitOutcome, UiEvent, UploadController};
use ui::{terminal, UiState};

#[derive(Parser, Debug)]
#[command(name = "defect-detect", version, about = "Upload images to a defect detection service")]
struct Args {
    /// Base URL of the prediction service.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit an image and print the detections.
    Predict {
        file: Option<PathBuf>,
        /// Overrides the MIME type guessed from the file extension.
        #[arg(long)]
        mime: Option<String>,
        /// Save the annotated image returned by the service.
        #[arg(long)]
        save_annotated: Option<PathBuf>,
        /// Print the raw prediction JSON instead of the table.
        #[arg(long)]
        json: bool,
    },
    /// Show service health.
    Health,
    /// List the defect classes the model knows.
    Classes,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = PredictClient::new(&settings.server_url)?;
    let style = terminal::Style {
        ansi: !args.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal(),
    };

    match args.command {
        Command::Predict {
            file,
            mime,
            save_annotated,
            json,
        } => {
            let selected = file.map(|path| match mime {
                Some(mime) => SelectedFile::with_mime_type(path, mime),
                None => SelectedFile::from_path(path),
            });
            run_predict(client, selected, save_annotated.as_deref(), json, style).await
        }
        Command::Health => {
            let health = client.health().await.context("health check failed")?;
            println!(
                "{} {} (status: {}, model loaded: {})",
                health.app_name, health.version, health.status, health.model_loaded
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Classes => {
            let classes = client.classes().await.context("failed to list classes")?;
            println!("{} classes", classes.total_classes);
            for class_name in classes.classes {
                println!("  {class_name}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_predict(
    client: PredictClient,
    selected: Option<SelectedFile>,
    save_annotated: Option<&Path>,
    json: bool,
    style: terminal::Style,
) -> Result<ExitCode> {
    let mut controller = UploadController::new(client.clone());
    controller.attach(UiState::new());
    controller.handle(UiEvent::FileSelected(selected)).await;
    debug!(
        file = ?controller.selected_file().map(SelectedFile::name),
        "submitting selection"
    );
    let outcome = controller
        .handle(UiEvent::Submit)
        .await
        .unwrap_or(SubmitOutcome::Ignored);
    let view = controller
        .detach()
        .context("view was torn down during submission")?;

    if let Some(err) = outcome.error() {
        debug!(kind = ?err.kind(), status = ?err.status, "submission failed");
    }

    match (&outcome, json) {
        (SubmitOutcome::Rendered(response), true) => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        (_, true) => eprint!("{}", terminal::render(&view, terminal::Style::plain())),
        (_, false) => print!("{}", terminal::render(&view, style)),
    }

    if let (SubmitOutcome::Rendered(response), Some(path)) = (&outcome, save_annotated) {
        let bytes = client.fetch_annotated_image(&response.image_url).await?;
        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("failed to write annotated image to {}", path.display()))?;
        info!(path = %path.display(), "saved annotated image");
        eprintln!("Saved annotated image to {}", path.display());
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
