// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lyricsync::app_config::{self, Config, RepeatMode};
use lyricsync::file_utils::FileManager;
use lyricsync::lyrics_parser::{TimedDocument, validate_lyrics};
use lyricsync::sync::{
    Emphasis, LyricView, MediaTransport, PlayerSession, SimulatedClock, emphasis_for, format_time,
};
use lyricsync::upload::accept_lyrics;

// @const: Seconds of silence appended after the last line when no duration is given
const TRAILING_SECONDS: f64 = 5.0;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a file contains recognizable timed lyrics
    Check {
        /// Lyrics file (LRC, SRT or VTT content; the extension is ignored)
        #[arg(value_name = "LYRICS_FILE")]
        lyrics_file: PathBuf,
    },

    /// Parse a lyrics file and print the timed lines as JSON
    Parse {
        /// Lyrics file (LRC, SRT or VTT content; the extension is ignored)
        #[arg(value_name = "LYRICS_FILE")]
        lyrics_file: PathBuf,

        /// Write the JSON to a file instead of standard output
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Play lyrics against a simulated clock, highlighting the active line
    Play(PlayArgs),

    /// Generate shell completions for lyricsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Lyrics file (LRC, SRT or VTT content; the extension is ignored)
    #[arg(value_name = "LYRICS_FILE")]
    lyrics_file: PathBuf,

    /// Track length in seconds (defaults to a few seconds past the last line)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Position to start playback from, in seconds
    #[arg(short, long, default_value_t = 0.0)]
    start: f64,

    /// Playback speed multiplier
    #[arg(short, long)]
    rate: Option<f64>,

    /// Also show the full-screen style view
    #[arg(short, long)]
    immersive: bool,

    /// Restart the track when it ends, until interrupted
    #[arg(long)]
    repeat: bool,
}

/// lyricsync - timed lyrics for audio playback
///
/// Parses timed-text files of unknown format (LRC, SRT, VTT) and keeps the
/// current line in sync with a playback position.
#[derive(Parser, Debug)]
#[command(name = "lyricsync")]
#[command(version)]
#[command(about = "Timed lyrics parsing and playback synchronization")]
#[command(long_about = "lyricsync parses timed lyrics of unknown format and follows playback line by line.

EXAMPLES:
    lyricsync check song.lrc                     # Validate a lyrics file
    lyricsync parse song.srt --pretty            # Print parsed lines as JSON
    lyricsync play song.lrc                      # Follow lyrics in real time
    lyricsync play song.vtt -s 60 -r 2           # Start at 1:00, double speed
    lyricsync play song.lrc --repeat             # Loop the track until Ctrl-C
    lyricsync completions bash > lyricsync.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Symbol and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✖", "1;31"),
            Level::Warn => ("!", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("?", "1;36"),
            Level::Trace => ("·", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (symbol, color) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, symbol, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

// @struct: Terminal list of lines around the active one
struct TerminalView {
    name: String,
    document: Arc<TimedDocument>,
    context_lines: usize,
    progress: ProgressBar,
}

impl LyricView for TerminalView {
    fn name(&self) -> &str {
        &self.name
    }

    fn center_on(&mut self, index: usize) {
        let first = index.saturating_sub(self.context_lines);
        let last = index
            .saturating_add(self.context_lines)
            .min(self.document.len().saturating_sub(1));

        let mut block = String::new();
        for i in first..=last {
            let Some(entry) = self.document.get(i) else {
                continue;
            };
            let line = match emphasis_for(i, Some(index)) {
                Emphasis::Active => format!("\x1B[1;37m  ▶ {}\x1B[0m", entry.text),
                Emphasis::Near => format!("\x1B[0;37m    {}\x1B[0m", entry.text),
                Emphasis::Far | Emphasis::Distant => format!("\x1B[2;37m    {}\x1B[0m", entry.text),
            };
            block.push_str(&line);
            block.push('\n');
        }
        self.progress.println(block);
    }
}

// @struct: Full-screen style view showing only the active line
struct ImmersiveView {
    document: Arc<TimedDocument>,
    progress: ProgressBar,
}

impl LyricView for ImmersiveView {
    fn name(&self) -> &str {
        "immersive"
    }

    fn center_on(&mut self, index: usize) {
        if let Some(entry) = self.document.get(index) {
            self.progress.println(format!("\x1B[1;35m  ♪ {} ♪\x1B[0m", entry.text.to_uppercase()));
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "lyricsync", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;

    match cli.command {
        Commands::Check { lyrics_file } => run_check(&lyrics_file),
        Commands::Parse { lyrics_file, output, pretty } => run_parse(&lyrics_file, output, pretty),
        Commands::Play(args) => run_play(args, config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

// @loads: Config file with CLI overrides, then applies the log level
fn load_config(config_path: &str, cli_log_level: Option<CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = &cli_log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(config_path)?;

    // Update log level in config if specified via command line
    if let Some(level) = cli_log_level {
        config.log_level = level.into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

fn run_check(lyrics_file: &Path) -> Result<()> {
    let content = FileManager::read_lyrics_file(lyrics_file)?;
    match accept_lyrics(&content) {
        Ok(summary) => {
            info!("{:?}: {} timed lines", lyrics_file, summary.line_count);
            println!("{}", summary.line_count);
            Ok(())
        }
        Err(e) => {
            error!("{:?}: {}", lyrics_file, e);
            Err(anyhow!(e))
        }
    }
}

fn run_parse(lyrics_file: &Path, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let content = FileManager::read_lyrics_file(lyrics_file)?;
    let validation = validate_lyrics(&content);
    if !validation.valid {
        warn!("No timed lines recognized in {:?}", lyrics_file);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&validation)
    } else {
        serde_json::to_string(&validation)
    }
    .context("Failed to serialize parsed lyrics")?;

    match output {
        Some(path) => {
            FileManager::write_to_file(&path, &json)?;
            info!("Wrote {} lines to {:?}", validation.line_count, path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

async fn run_play(args: PlayArgs, config: Config) -> Result<()> {
    let content = FileManager::read_lyrics_file(&args.lyrics_file)?;
    let summary = accept_lyrics(&content)
        .with_context(|| format!("Cannot play lyrics from {:?}", args.lyrics_file))?;

    let last_time = summary.parsed.last_time().unwrap_or(0.0);
    let duration = args.duration.unwrap_or(last_time + TRAILING_SECONDS);
    if !(duration.is_finite() && duration > 0.0) {
        return Err(anyhow!("Track duration must be greater than zero, got {}", duration));
    }
    let rate = args.rate.unwrap_or(config.sync.playback_rate);
    if !(rate.is_finite() && rate > 0.0) {
        return Err(anyhow!("Playback rate must be greater than zero, got {}", rate));
    }

    let mut sync_config = config.sync.clone();
    if args.repeat {
        sync_config.repeat = RepeatMode::One;
    }

    let document = Arc::new(summary.parsed);
    let clock = SimulatedClock::new(duration, rate);
    let mut session = PlayerSession::new(clock, document.clone(), sync_config);

    let progress = ProgressBar::new((duration * 1000.0) as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.magenta/blue} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("━━─"),
    );

    session.attach_view(
        Box::new(TerminalView {
            name: "lyrics".to_string(),
            document: document.clone(),
            context_lines: config.display.context_lines,
            progress: progress.clone(),
        }),
        config.display.show_lyrics,
    );
    session.attach_view(
        Box::new(ImmersiveView {
            document: document.clone(),
            progress: progress.clone(),
        }),
        args.immersive || config.display.immersive,
    );

    info!(
        "Playing {} lines over {} at {}x",
        document.len(),
        format_time(duration),
        rate
    );

    session.seek(args.start);
    session.transport_mut().play();

    let mut interval = tokio::time::interval(Duration::from_millis(config.sync.tick_interval_ms));
    let mut last_tick = Instant::now();
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut interrupted => {
                warn!("Playback interrupted");
                break;
            }
        }

        let now = Instant::now();
        session.transport_mut().advance(now - last_tick);
        last_tick = now;

        if let Some(change) = session.on_time_update() {
            debug!("Line {} at {:.3}s", change.signed(), session.transport().current_time());
        }

        progress.set_position((session.display_time() * 1000.0) as u64);
        progress.set_message(format!(
            "{} / -{}",
            format_time(session.display_time()),
            format_time(session.remaining_time())
        ));

        if session.transport().is_finished() {
            session.on_ended();
            if !session.transport().is_playing() {
                info!("Playback finished");
                break;
            }
            info!("Repeating from the start");
            last_tick = Instant::now();
        }
    }

    progress.finish_and_clear();
    Ok(())
}
