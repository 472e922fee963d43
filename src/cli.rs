use clap::Parser;
use std::path::PathBuf;

// Build version with backend info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Audio:  rodio 0.21\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Phonics learning player
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Passage id to preselect on startup (see the Passages tab) - optional
    #[arg(value_name = "PASSAGE")]
    pub passage: Option<String>,

    /// Base URL the audio/video assets are served from
    #[arg(short = 'A', long = "assets", value_name = "URL")]
    pub assets: Option<String>,

    /// Start in fullscreen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Run the asset availability check on startup
    #[arg(short = 'p', long = "probe")]
    pub probe_on_start: bool,

    /// Enable debug logging to file (default: phonica.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
