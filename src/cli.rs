// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "scene-viewer")]
#[command(about = "Interactive 3D scene viewer", long_about = None)]
pub struct Cli {
    /// Hide the control panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Milliseconds between render ticks
    #[arg(long = "tick-ms")]
    pub tick_ms: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Figure to add at startup (cube, pyramid, cone); repeatable
    #[arg(long = "figure", value_name = "KIND")]
    pub figures: Vec<String>,

    /// Log filter, e.g. "debug" or "scene_viewer=debug,wgpu=warn"
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}
