// The heatmap engine: one field, one accumulator, one renderer, and at most
// one render loop. Everything the window host calls goes through here.

use std::time::Instant;

use crate::accumulator::Accumulator;
use crate::cadence::RenderLoop;
use crate::config::Params;
use crate::error::Error;
use crate::export;
use crate::field::IntensityField;
use crate::renderer::Renderer;
use crate::types::Position;

pub struct HeatmapEngine {
    field: IntensityField,
    accumulator: Accumulator,
    renderer: Renderer,
    params: Params,
    render_loop: Option<RenderLoop>,
    loop_generation: u64,
}

impl HeatmapEngine {
    /// Engine for a surface of the given size, already rendered (all clear).
    pub fn new(width: usize, height: usize, params: Params) -> Result<Self, Error> {
        let field = IntensityField::allocate(width, height)?;
        let mut renderer = Renderer::with_size(width, height)?;
        renderer.render(&field);
        Ok(Self {
            field,
            accumulator: Accumulator::new(),
            renderer,
            params,
            render_loop: None,
            loop_generation: 0,
        })
    }

    /// Surface changed size: drop the old heat and start over at the new size.
    pub fn on_resize(&mut self, width: usize, height: usize) -> Result<(), Error> {
        // Allocate both buffers first so a failure leaves the current
        // surface untouched.
        let field = IntensityField::allocate(width, height)?;
        let renderer = Renderer::with_size(width, height)?;
        self.field = field;
        self.renderer = renderer;
        self.accumulator.lift();
        self.renderer.render(&self.field);
        log::info!("Surface resized to {width}x{height}");
        Ok(())
    }

    /// Pointer moved to surface-local (x, y).
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Result<(), Error> {
        let pos = Position::new(x, y);
        if !pos.is_finite() {
            log::warn!("Ignoring non-finite pointer position ({x}, {y})");
            return Err(Error::NonFinitePosition { x, y });
        }
        self.accumulator.update(&mut self.field, &self.params, pos);
        Ok(())
    }

    /// Pointer left the surface; the next move starts a fresh trail.
    pub fn pointer_left(&mut self) {
        self.accumulator.lift();
    }

    pub fn params(&self) -> Params {
        self.params
    }

    /// Replace the brush parameters. A running render loop is restarted under
    /// a new generation at the same rate.
    pub fn set_params(&mut self, params: Params) {
        if params == self.params {
            return;
        }
        log::debug!(
            "Params changed: intensity {} -> {}, radius {} -> {}",
            self.params.intensity(),
            params.intensity(),
            self.params.radius(),
            params.radius()
        );
        self.params = params;
        if let Some(fps) = self.render_loop.as_ref().map(RenderLoop::fps) {
            self.start_render_loop(fps);
        }
    }

    /// Zero the field and the visible output.
    pub fn clear(&mut self) {
        self.field.clear();
        self.renderer.render(&self.field);
        log::info!("Heatmap cleared");
    }

    /// Render the current field now.
    pub fn render(&mut self) -> &[u8] {
        self.renderer.render(&self.field)
    }

    /// Last rendered RGBA buffer.
    pub fn pixels(&self) -> &[u8] {
        self.renderer.pixels()
    }

    /// PNG bytes of the current rendered buffer.
    pub fn export_image(&self) -> Result<Vec<u8>, Error> {
        let (w, h) = self.renderer.dimensions();
        let bytes = export::encode_png(w, h, self.renderer.pixels())?;
        log::info!("Exported {w}x{h} heatmap ({} bytes)", bytes.len());
        Ok(bytes)
    }

    pub fn field(&self) -> &IntensityField {
        &self.field
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.field.dimensions()
    }

    /// Start the render loop, stopping the previous one first.
    pub fn start_render_loop(&mut self, fps: u32) {
        self.stop_render_loop();
        self.loop_generation += 1;
        let rl = RenderLoop::new(self.loop_generation, fps, Instant::now());
        log::debug!("Render loop #{} started at {} fps", rl.generation(), rl.fps());
        self.render_loop = Some(rl);
    }

    pub fn stop_render_loop(&mut self) {
        if let Some(rl) = self.render_loop.take() {
            log::debug!("Render loop #{} stopped", rl.generation());
        }
    }

    pub fn is_render_loop_active(&self) -> bool {
        self.render_loop.is_some()
    }

    /// Generation of the running loop, if any.
    pub fn render_loop_generation(&self) -> Option<u64> {
        self.render_loop.as_ref().map(RenderLoop::generation)
    }

    /// Render if the active loop has a frame due at `now`. Returns whether a
    /// frame was produced; the bytes are then in `pixels()`.
    pub fn poll_frame(&mut self, now: Instant) -> bool {
        let due = match self.render_loop.as_mut() {
            Some(rl) => rl.poll(now),
            None => false,
        };
        if due {
            self.renderer.render(&self.field);
        }
        due
    }
}
