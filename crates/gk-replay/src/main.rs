//! Gaiseki replay: run a recorded input script through the editor.
//!
//! ```text
//! gk-replay <events.json> [--config <config.json>] [--out <frame.ppm>]
//! ```
//!
//! The script is a JSON array of input events. An implicit `quit` is
//! appended, and the last presented frame is written as a binary PPM.
//! Set `RUST_LOG=debug` to trace every event.

mod ppm;

use gk_core::{ConfigError, EditorConfig};
use gk_editor::{Editor, EditorError, InputEvent, ScriptedEvents};
use gk_render::PixelBuffer;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

const USAGE: &str = "usage: gk-replay <events.json> [--config <config.json>] [--out <frame.ppm>]";

#[derive(Error, Debug)]
enum ReplayError {
    #[error("{0}")]
    Usage(String),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: invalid config: {source}")]
    Config { path: PathBuf, source: ConfigError },

    #[error("{path}: invalid event script: {source}")]
    Script {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    events: PathBuf,
    config: Option<PathBuf>,
    out: PathBuf,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ReplayError> {
        let mut events = None;
        let mut config = None;
        let mut out = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "--out" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ReplayError::Usage(format!("{arg} needs a path")))?;
                    let slot = if arg == "--config" {
                        &mut config
                    } else {
                        &mut out
                    };
                    *slot = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => {
                    return Err(ReplayError::Usage(format!("unknown option {flag}")));
                }
                _ if events.is_none() => events = Some(PathBuf::from(&arg)),
                _ => return Err(ReplayError::Usage(format!("unexpected argument {arg}"))),
            }
        }
        Ok(Self {
            events: events.ok_or_else(|| ReplayError::Usage("missing event script".into()))?,
            config,
            out: out.unwrap_or_else(|| PathBuf::from("frame.ppm")),
        })
    }
}

fn read(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, ReplayError> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    EditorConfig::from_json(&read(path)?).map_err(|source| ReplayError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn replay(args: &Args) -> Result<(), ReplayError> {
    let config = load_config(args.config.as_deref())?;
    let mut script =
        InputEvent::parse_script(&read(&args.events)?).map_err(|source| ReplayError::Script {
            path: args.events.clone(),
            source,
        })?;
    script.push(InputEvent::Quit);
    log::info!("replaying {} events from {}", script.len(), args.events.display());

    let (width, height) = (config.real_width, config.real_height);
    let mut editor = Editor::new(config)?;
    let mut surface = PixelBuffer::new(width, height).map_err(EditorError::from)?;
    let stats = editor.run(&mut ScriptedEvents::new(script), &mut surface)?;

    let io_err = |source| ReplayError::Io {
        path: args.out.clone(),
        source,
    };
    let mut out = BufWriter::new(fs::File::create(&args.out).map_err(io_err)?);
    ppm::write_ppm(&mut out, width, height, surface.presented()).map_err(io_err)?;

    log::info!(
        "{} points, {} frames, wrote {}",
        editor.curve().len(),
        stats.frames,
        args.out.display()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Args::parse(std::env::args().skip(1)).and_then(|args| replay(&args));
    if let Err(e) = result {
        eprintln!("gk-replay: {e}");
        if matches!(e, ReplayError::Usage(_)) {
            eprintln!("{USAGE}");
        }
        std::process::exit(1);
    }
}
