use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::Command;

use eyre::{Result, bail};
use log::{debug, info};

mod cli;

use cli::{Cli, OutputFormat};

use ytsum::Report;
use ytsum::pipeline::Pipeline;
use ytsum::stt::{WhisperApi, WhisperModel};
use ytsum::summarize::{DEFAULT_MAX_CHUNK_CHARS, HfSummarizer};
use ytsum::youtube::YtDlpTool;

const DEFAULT_LANG: &str = "en";
const DEFAULT_SUMMARY_MODEL: &str = "sshleifer/distilbart-cnn-12-6";

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsum")
        .join("logs")
}

fn tool_version(name: &str) -> Option<String> {
    Command::new(name)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .trim()
                .lines()
                .next()
                .unwrap_or("")
                .to_string()
        })
}

fn build_after_help() -> String {
    let yt_dlp = tool_version("yt-dlp");
    let ffmpeg = tool_version("ffmpeg");

    let yt_dlp_line = match &yt_dlp {
        Some(v) => format!("  \x1b[32m✅\x1b[0m yt-dlp     {v}"),
        None => "  \x1b[31m❌\x1b[0m yt-dlp     (not found — needed for URL input)".to_string(),
    };
    let ffmpeg_line = match &ffmpeg {
        Some(v) => format!("  \x1b[32m✅\x1b[0m ffmpeg     {v}"),
        None => "  \x1b[31m❌\x1b[0m ffmpeg     (not found — needed for --file input and audio fallback)".to_string(),
    };

    let log_path = log_dir().join("ytsum.log");

    format!(
        "\nREQUIRED TOOLS:\n{yt_dlp_line}\n{ffmpeg_line}\n\nLogs are written to: {}",
        log_path.display()
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = ytsum::config::Config::load().unwrap_or_default();

    // CLI flags take priority over config defaults
    let lang = cli
        .lang
        .clone()
        .or_else(|| config.default_lang.clone())
        .unwrap_or_else(|| DEFAULT_LANG.to_string());
    let summary_model = cli
        .model
        .clone()
        .or_else(|| config.summary_model.clone())
        .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string());
    let whisper_model = config
        .whisper_model
        .as_deref()
        .and_then(WhisperModel::parse)
        .unwrap_or_default();
    let max_chunk_chars = config.max_chunk_chars.unwrap_or(DEFAULT_MAX_CHUNK_CHARS);
    let format = cli.format.unwrap_or_else(|| match config.default_format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    if cli.verbose {
        let config_path = ytsum::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        debug!("lang={lang} summary_model={summary_model} max_chunk_chars={max_chunk_chars}");
    }

    let client = reqwest::Client::new();

    let mut pipeline = Pipeline::new(
        YtDlpTool,
        WhisperApi::new(client.clone(), whisper_model, lang.clone()),
        HfSummarizer::new(client, summary_model),
        lang,
        max_chunk_chars,
    );
    if cli.no_fallback {
        pipeline = pipeline.without_fallback();
    }

    // A local file is a single request
    if let Some(ref path) = cli.file {
        let report = if cli.transcript_only {
            pipeline.fetch_transcript_file(path).await?
        } else {
            pipeline.run_file(path).await?
        };
        emit(&report, format, &cli)?;
        return Ok(());
    }

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.is_empty() {
        bail!(
            "no URL, video ID, or file provided\n\nUsage: ytsum <URL>\n       ytsum --file <VIDEO>\n       echo <URL> | ytsum"
        );
    }

    for url_input in &urls {
        let url_input = url_input.trim();
        if url_input.is_empty() {
            continue;
        }

        let report = if cli.transcript_only {
            pipeline.fetch_transcript_url(url_input).await?
        } else {
            pipeline.run_url(url_input).await?
        };

        if cli.verbose {
            eprintln!(
                "Video: {} ({})\nSource: {}\nLanguage: {}",
                report.title.as_deref().unwrap_or("(untitled)"),
                report.video_id.as_deref().unwrap_or("-"),
                report.source,
                report.language,
            );
        }

        emit(&report, format, &cli)?;
    }

    Ok(())
}

fn emit(report: &Report, format: OutputFormat, cli: &Cli) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => ytsum::output::render_text(report),
        OutputFormat::Json => ytsum::output::render_json(report),
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{rendered}");
    }

    Ok(())
}
