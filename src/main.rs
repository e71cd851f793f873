#![forbid(unsafe_code)]

//! `tubetalk` — interactive session binary.
//!
//! Bootstraps configuration, probes the Analysis Service, and runs a small
//! line-oriented loop where the user submits a video and asks questions
//! about it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use tubetalk::config::GlobalConfig;
use tubetalk::models::message::{Message, MessageAuthor};
use tubetalk::orchestrator::connectivity::ConnectivityState;
use tubetalk::orchestrator::session::{SessionOrchestrator, SessionPhase};
use tubetalk::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tubetalk", about = "Chat with a YouTube video", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Video reference to submit immediately after startup.
    #[arg(long)]
    video: Option<String>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("tubetalk session bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let config = load_config(args.config.as_deref())?;
    info!(analysis_url = %config.analysis.base_url, "configuration loaded");

    // ── Build the session ───────────────────────────────
    let session = SessionOrchestrator::new(&config)?;
    for message in session.messages() {
        print_message(&message);
    }

    // ── Startup connectivity probe ──────────────────────
    match session.probe_connectivity().await {
        ConnectivityState::Connected => info!("analysis service connected"),
        other => {
            warn!(state = ?other, "analysis service not reachable at startup");
            println!("(analysis service unreachable; /probe to retry)");
        }
    }

    if let Some(video) = args.video {
        submit_video(&session, &video).await;
    }

    // ── Interactive loop ────────────────────────────────
    println!("commands: /video <url>, /probe, /status, /quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }
        if line == "/probe" {
            let state = session.probe_connectivity().await;
            println!("(analysis service: {})", connectivity_label(state));
            continue;
        }
        if line == "/status" {
            print_status(&session);
            continue;
        }
        if let Some(video) = line.strip_prefix("/video ") {
            submit_video(&session, video).await;
            continue;
        }
        match session.send_message(line).await {
            Ok(reply) => print_message(&reply),
            Err(err) => println!("(error: {err})"),
        }
    }

    info!("tubetalk session ended");
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<GlobalConfig> {
    let mut config = match path {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    config.load_env_overrides()?;
    Ok(config)
}

async fn submit_video(session: &SessionOrchestrator, video: &str) {
    println!("(processing video...)");
    match session.request_ingestion(video).await {
        Ok(result) => {
            if let Some(confirmation) = session.messages().pop() {
                print_message(&confirmation);
            }
            info!(segment_count = result.segment_count, "video ready");
        }
        Err(err) => println!("(error: {err})"),
    }
}

fn print_status(session: &SessionOrchestrator) {
    let phase = match session.phase() {
        SessionPhase::Idle => "idle",
        SessionPhase::Ingesting => "ingesting",
        SessionPhase::ReadyForChat => "ready for chat",
    };
    println!(
        "(phase: {phase}; analysis service: {})",
        connectivity_label(session.connectivity())
    );
    if let Some(video) = session.ingestion_result() {
        println!(
            "(active video: {} with {} segments)",
            video.video_reference, video.segment_count
        );
    }
}

fn connectivity_label(state: ConnectivityState) -> &'static str {
    match state {
        ConnectivityState::Checking => "checking",
        ConnectivityState::Connected => "connected",
        ConnectivityState::Disconnected => "disconnected",
    }
}

fn print_message(message: &Message) {
    let who = match message.author {
        MessageAuthor::User => "you",
        MessageAuthor::Assistant => "assistant",
    };
    println!("{who}: {}", message.content);
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
