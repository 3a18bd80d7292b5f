use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use scene_viewer::app::App;
use scene_viewer::cli::Cli;
use scene_viewer::config::ViewerConfig;
use scene_viewer::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = ViewerConfig::load(&cli)?;
    log::info!(
        "starting scene viewer: {}x{}, tick {} ms, ui {}",
        config.window_width,
        config.window_height,
        config.tick_interval_ms,
        if config.show_ui { "on" } else { "off" }
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    app.finish()
}
