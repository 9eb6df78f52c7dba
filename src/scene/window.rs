use minifb::{Key, MouseMode, Window, WindowOptions};

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{DoodleError, DoodleResult};
use crate::render::frame::FrameRGBA;
use crate::scene::frame_loop::{SceneEvent, SceneHost};

/// Native window host. Esc or closing the window stops the loop.
pub struct WindowHost {
    window: Window,
    buffer: Vec<u32>,
    size: (usize, usize),
    pointer_inside: bool,
    last_pointer: Option<(f32, f32)>,
}

impl std::fmt::Debug for WindowHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowHost")
            .field("size", &self.size)
            .field("pointer_inside", &self.pointer_inside)
            .finish()
    }
}

impl WindowHost {
    /// Open a resizable window of `canvas` size.
    pub fn open(title: &str, canvas: Canvas) -> DoodleResult<Self> {
        let size = (canvas.width as usize, canvas.height as usize);
        let mut window = Window::new(
            title,
            size.0,
            size.1,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| DoodleError::render(format!("open window: {e}")))?;
        window.set_target_fps(60);
        Ok(Self {
            window,
            buffer: Vec::new(),
            size,
            pointer_inside: false,
            last_pointer: None,
        })
    }
}

impl SceneHost for WindowHost {
    fn poll_events(&mut self, out: &mut Vec<SceneEvent>) {
        let (w, h) = self.window.get_size();
        if (w, h) != self.size && w > 0 && h > 0 {
            self.size = (w, h);
            out.push(SceneEvent::Resize(Canvas {
                width: w as u32,
                height: h as u32,
            }));
        }

        match self.window.get_mouse_pos(MouseMode::Discard) {
            Some(pos) => {
                if self.last_pointer != Some(pos) {
                    out.push(SceneEvent::PointerMove(Point::new(
                        f64::from(pos.0),
                        f64::from(pos.1),
                    )));
                }
                self.pointer_inside = true;
                self.last_pointer = Some(pos);
            }
            None if self.pointer_inside => {
                self.pointer_inside = false;
                self.last_pointer = None;
                out.push(SceneEvent::PointerLeave);
            }
            None => {}
        }
    }

    fn present(&mut self, frame: &FrameRGBA) -> DoodleResult<()> {
        frame.to_0rgb_u32(&mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, frame.width as usize, frame.height as usize)
            .map_err(|e| DoodleError::render(format!("update window: {e}")))
    }

    fn wait_for_frame(&mut self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    fn detach(&mut self) {
        self.buffer = Vec::new();
        self.pointer_inside = false;
        self.last_pointer = None;
    }
}
