// The window host: a resizable minifb window that shows the composited
// heatmap and reports pointer position, size and key commands.

use heatcheck::{Error, FrameBuffer};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

/// Keyboard commands, read once per loop iteration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Commands {
    pub clear: bool,
    pub export: bool,
    /// Intensity steps (+1 per Up press, -1 per Down press).
    pub intensity_steps: i32,
    /// Radius steps (+1 per Right press, -1 per Left press).
    pub radius_steps: i32,
}

pub struct Surface {
    window: Window,
}

impl Surface {
    pub fn new(title: &str, width: usize, height: usize, fps: u32) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps as usize);
        Ok(Self { window })
    }

    /// Push a frame to the screen (also pumps window events).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Pump window events without a new frame.
    pub fn pump(&mut self) {
        self.window.update();
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Pointer in surface-local pixels, `None` while it is outside the window.
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn commands(&self) -> Commands {
        let pressed = |key| self.window.is_key_pressed(key, KeyRepeat::Yes);
        let once = |key| self.window.is_key_pressed(key, KeyRepeat::No);
        Commands {
            clear: once(Key::C),
            export: once(Key::S),
            intensity_steps: pressed(Key::Up) as i32 - pressed(Key::Down) as i32,
            radius_steps: pressed(Key::Right) as i32 - pressed(Key::Left) as i32,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}
