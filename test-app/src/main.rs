// trigboard test application -- CLI tool for exercising the driver
// against real hardware or a mock transport.
//
// Usage:
//   trigboard-test-app --model gpstar-audio --port /dev/ttyUSB0 hello
//   trigboard-test-app --model gpstar-audio --port /dev/ttyUSB0 play 12 --solo
//   trigboard-test-app --model wav-trigger --port /dev/ttyUSB0 version
//   trigboard-test-app --model gpstar-audio --mock info
//   trigboard-test-app list

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use trigboard::gpstar::models::model_by_id;
use trigboard::gpstar::GpstarBuilder;
use trigboard::TriggerBoard;
use trigboard_test_harness::MockTransport;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// trigboard test application -- exercises the board driver from the
/// command line.
#[derive(Parser)]
#[command(name = "trigboard-test-app", version, about)]
struct Cli {
    /// Board model: gpstar-audio or wav-trigger.
    /// Required for all commands except `list`.
    #[arg(long)]
    model: Option<String>,

    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    /// Required unless --mock is used.
    #[arg(long)]
    port: Option<String>,

    /// Override the default baud rate for this model.
    #[arg(long)]
    baud: Option<u32>,

    /// Use a mock transport instead of a real serial port.
    /// Useful for verifying CLI parsing and builder wiring without
    /// hardware.
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported board models.
    List,

    /// Print board info and capabilities.
    Info,

    /// Run the hello handshake and print what the board reports.
    Hello,

    /// Request and print the firmware version string.
    Version,

    /// Play a track.
    Play {
        /// Track number.
        track: u16,
        /// Stop everything else first.
        #[arg(long)]
        solo: bool,
        /// Protect the track's voice from being stolen.
        #[arg(long)]
        lock: bool,
    },

    /// Stop a track.
    Stop {
        /// Track number.
        track: u16,
    },

    /// Stop all tracks.
    StopAll,

    /// Set master gain, or a single track's gain with --track.
    Gain {
        /// Gain in dB (-70..=10).
        #[arg(allow_hyphen_values = true)]
        gain_db: i16,
        /// Apply to this track instead of the master output.
        #[arg(long)]
        track: Option<u16>,
    },

    /// Fade a track to a target gain.
    Fade {
        /// Track number.
        track: u16,
        /// Target gain in dB.
        #[arg(allow_hyphen_values = true)]
        gain_db: i16,
        /// Fade time in milliseconds.
        time_ms: u16,
        /// Stop the track when the fade completes.
        #[arg(long)]
        stop: bool,
    },

    /// Poll a track's playback status.
    Status {
        /// Track number.
        track: u16,
    },

    /// Poll telemetry for a while and print status changes.
    Poll {
        /// How long to poll, in seconds.
        #[arg(long, default_value_t = 5)]
        duration: u64,
        /// Track whose status to watch.
        track: u16,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Command::List = cli.command {
        for board in trigboard::supported_boards() {
            println!(
                "{:<14} {:<22} {} baud, {} voices",
                board.vendor, board.model_name, board.default_baud_rate, board.capabilities.num_voices
            );
        }
        return Ok(());
    }

    let model_id = cli
        .model
        .as_deref()
        .context("--model is required (gpstar-audio or wav-trigger)")?;
    let model = model_by_id(model_id)
        .with_context(|| format!("unknown model '{model_id}' (try `list`)"))?;

    let mut builder = GpstarBuilder::new(model);
    if let Some(baud) = cli.baud {
        builder = builder.baud_rate(baud);
    }

    let mut board = if cli.mock {
        builder
            .build_with_transport(Box::new(MockTransport::new()))
            .await?
    } else {
        let port = match cli.port.as_deref() {
            Some(port) => port,
            None => bail!("--port is required unless --mock is used"),
        };
        builder.serial_port(port).build().await?
    };

    run_command(&mut board, cli.command).await
}

async fn run_command(board: &mut dyn TriggerBoard, command: Command) -> Result<()> {
    match command {
        Command::List => unreachable!("handled before connecting"),

        Command::Info => {
            let info = board.info();
            println!("{} {} ({})", info.vendor, info.model_name, info.model_id);
            let caps = board.capabilities();
            println!("  voices:          {}", caps.num_voices);
            println!("  telemetry:       {}", if caps.voice_table { "per-voice reports" } else { "current-track report" });
            println!("  handshake:       {}", if caps.hello { "hello" } else { "version + sys-info" });
            println!("  queue commands:  {}", caps.queue);
        }

        Command::Hello => {
            board.hello().await?;
            // The reply is a single short frame; one settle interval is
            // plenty at 57600 baud.
            tokio::time::sleep(Duration::from_millis(100)).await;
            if board.hello_received().await? {
                println!("hello: {} voices, {} tracks", board.num_voices().await?, board.num_tracks().await?);
            } else {
                println!("no hello response (is the board powered and wired TX->RX?)");
            }
        }

        Command::Version => {
            board.request_version().await?;
            tokio::time::sleep(Duration::from_millis(100)).await;
            match board.version().await? {
                Some(version) => println!("firmware: {version}"),
                None => println!("no version response"),
            }
        }

        Command::Play { track, solo, lock } => {
            if solo {
                board.track_play_solo(track, lock).await?;
            } else {
                board.track_play_poly(track, lock).await?;
            }
            println!("playing track {track}");
        }

        Command::Stop { track } => {
            board.track_stop(track).await?;
            println!("stopped track {track}");
        }

        Command::StopAll => {
            board.stop_all().await?;
            println!("stopped all tracks");
        }

        Command::Gain { gain_db, track } => match track {
            Some(track) => {
                board.track_gain(track, gain_db).await?;
                println!("track {track} gain set to {gain_db} dB");
            }
            None => {
                board.master_gain(gain_db).await?;
                println!("master gain set to {gain_db} dB");
            }
        },

        Command::Fade { track, gain_db, time_ms, stop } => {
            board.track_fade(track, gain_db, time_ms, stop).await?;
            println!("fading track {track} to {gain_db} dB over {time_ms} ms");
        }

        Command::Status { track } => {
            if board.capabilities().track_status {
                board.request_track_status(track).await?;
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            let playing = board.is_track_playing(track).await?;
            println!("track {track}: {}", if playing { "playing" } else { "not playing" });
        }

        Command::Poll { duration, track } => {
            let deadline = tokio::time::Instant::now() + Duration::from_secs(duration);
            let mut last = None;
            while tokio::time::Instant::now() < deadline {
                let playing = board.is_track_playing(track).await?;
                if last != Some(playing) {
                    println!("track {track}: {}", if playing { "playing" } else { "not playing" });
                    last = Some(playing);
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
    }

    Ok(())
}
