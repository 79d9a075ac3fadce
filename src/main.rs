// What you SEE:
// • A white page. Move the mouse over it and a heat trail follows the pointer:
//   blue and faint where it passed quickly, red and solid where it lingered.
// • Up/Down change intensity, Left/Right change brush radius (shown in the title).
// • C clears, S saves the current heatmap as PNG. ESC quits.

mod window;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use heatcheck::{
    Config, Error, FrameBuffer, FrameStats, HeatmapEngine, Params, composite_over, export,
};
use window::Surface;

/// Keyboard step for intensity and radius.
const PARAM_STEP: i32 = 5;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live pointer heatmap")]
struct Cli {
    /// Initial window width
    #[arg(long, default_value_t = 800)]
    width: usize,
    /// Initial window height
    #[arg(long, default_value_t = 600)]
    height: usize,
    /// Render loop rate
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Brush intensity, 1-100
    #[arg(short, long, default_value_t = 50)]
    intensity: u32,
    /// Brush radius in pixels, 5-100
    #[arg(short, long, default_value_t = 25)]
    radius: u32,
    /// Page color behind the heat, as RRGGBB hex
    #[arg(long, default_value = "ffffff", value_parser = parse_color)]
    background: u32,
    /// Where S saves the PNG
    #[arg(short, long, default_value = export::DEFAULT_FILE_NAME)]
    output: PathBuf,
}

fn parse_color(s: &str) -> Result<u32, String> {
    let hex = s.trim_start_matches('#').trim_start_matches("0x");
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB, got {s:?}"));
    }
    u32::from_str_radix(hex, 16).map_err(|e| format!("{s:?}: {e}"))
}

impl Cli {
    fn into_config(self) -> Result<Config, Error> {
        let config = Config {
            width: self.width,
            height: self.height,
            fps: self.fps,
            params: Params::new(self.intensity, self.radius)?,
            background: self.background,
            export_path: self.output,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    env_logger::init();

    let result = Cli::parse().into_config().and_then(run);
    if let Err(e) = result {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn title(params: Params) -> String {
    format!(
        "HeatCheck | intensity {} | radius {}",
        params.intensity(),
        params.radius()
    )
}

fn run(config: Config) -> Result<(), Error> {
    log::info!("HeatCheck starting up");

    let mut surface = Surface::new(
        &title(config.params),
        config.width,
        config.height,
        config.fps,
    )?;
    let (w, h) = surface.size();
    let mut engine = HeatmapEngine::new(w, h, config.params)?;
    let mut screen = FrameBuffer::new(w, h, config.background);
    log::info!("Window created: {w}x{h}");

    engine.start_render_loop(config.fps);
    let mut stats = FrameStats::new(Instant::now());
    let mut last_pointer: Option<(f32, f32)> = None;

    while surface.is_open() {
        /* 1) Resize: fresh field, immediate clear frame. A minimized window
              reports 0x0; keep the old field until it comes back. */
        let (nw, nh) = surface.size();
        if (nw, nh) != engine.dimensions() && nw > 0 && nh > 0 {
            engine.on_resize(nw, nh)?;
            screen = FrameBuffer::new(nw, nh, config.background);
            composite_over(engine.pixels(), config.background, &mut screen);
            surface.present(&screen)?;
            last_pointer = None;
        }

        /* 2) Pointer: every change in position is one move event. */
        match surface.pointer() {
            Some(p) if Some(p) != last_pointer => {
                if let Err(e) = engine.on_pointer_move(p.0, p.1) {
                    log::warn!("{e}");
                }
                last_pointer = Some(p);
            }
            Some(_) => {}
            None => {
                if last_pointer.take().is_some() {
                    engine.pointer_left();
                }
            }
        }

        /* 3) Commands. */
        let cmd = surface.commands();
        if cmd.clear {
            engine.clear();
        }
        if cmd.intensity_steps != 0 || cmd.radius_steps != 0 {
            let params = engine
                .params()
                .nudge_intensity(cmd.intensity_steps * PARAM_STEP)
                .nudge_radius(cmd.radius_steps * PARAM_STEP);
            engine.set_params(params);
            surface.set_title(&title(params));
        }
        if cmd.export {
            match engine.export_image() {
                Ok(bytes) => {
                    if let Err(e) = export::save(&config.export_path, &bytes) {
                        log::warn!("Export failed: {e}");
                    }
                }
                Err(e) => log::warn!("Export failed: {e}"),
            }
        }

        /* 4) Frame: only when the render loop says one is due. */
        let now = Instant::now();
        if engine.poll_frame(now) {
            composite_over(engine.pixels(), config.background, &mut screen);
            surface.present(&screen)?;
            stats.record_frame(now);
        } else {
            surface.pump();
        }
    }

    engine.stop_render_loop();
    log::info!("Window closed after {} frames", stats.frame_count());
    Ok(())
}
