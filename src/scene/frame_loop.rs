use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::{Canvas, FrameIndex, Point};
use crate::foundation::error::DoodleResult;
use crate::render::frame::FrameRGBA;
use crate::render::surface::Surface;
use crate::scene::live::LiveScene;

/// Input delivered by a [`SceneHost`] between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    /// Pointer moved to a position in scene units.
    PointerMove(Point),
    /// Pointer left the scene.
    PointerLeave,
    /// Viewport changed size.
    Resize(Canvas),
    /// The host asked the scene to close.
    Close,
}

/// Display side of a running scene: event source, frame pacing and presentation.
pub trait SceneHost {
    /// Append pending events to `out`.
    fn poll_events(&mut self, out: &mut Vec<SceneEvent>);

    /// Show a finished frame.
    fn present(&mut self, frame: &FrameRGBA) -> DoodleResult<()>;

    /// Block until the next frame is due. `false` stops the loop.
    fn wait_for_frame(&mut self) -> bool;

    /// Release listeners and display resources. Called exactly once when the loop exits.
    fn detach(&mut self);
}

/// Shared stop flag for a [`FrameLoop`].
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop before its next frame.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Why a [`FrameLoop::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The cancel token was triggered.
    Cancelled,
    /// The host reported it will not show more frames.
    HostStopped,
    /// The host sent [`SceneEvent::Close`].
    Closed,
    /// The configured frame budget was reached.
    FrameLimit,
}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopExit {
    /// Frames presented.
    pub frames: u64,
    pub reason: ExitReason,
}

/// Drives a [`LiveScene`] against a [`SceneHost`] one frame at a time.
///
/// A loop runs once: on every exit path, errors included, the host is detached and the token is
/// left cancelled.
#[derive(Debug, Default)]
pub struct FrameLoop {
    token: CancelToken,
    max_frames: Option<u64>,
}

struct Teardown<'a, H: SceneHost> {
    host: &'a mut H,
    token: CancelToken,
}

impl<H: SceneHost> Drop for Teardown<'_, H> {
    fn drop(&mut self) {
        self.token.cancel();
        self.host.detach();
        tracing::debug!("scene host detached");
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `frames` presented frames.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Token that stops this loop.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Run until cancelled, closed, out of budget, or failed.
    pub fn run<H: SceneHost>(&self, scene: &mut LiveScene, host: &mut H) -> DoodleResult<LoopExit> {
        let guard = Teardown {
            host,
            token: self.token.clone(),
        };
        let mut surface = Surface::new(scene.viewport())?;
        let pointer = scene.pointer().clone();
        let mut events = Vec::new();
        let mut frame = FrameIndex::default();

        let reason = loop {
            if self.token.is_cancelled() {
                break ExitReason::Cancelled;
            }
            if self.max_frames.is_some_and(|max| frame.0 >= max) {
                break ExitReason::FrameLimit;
            }
            if !guard.host.wait_for_frame() {
                break ExitReason::HostStopped;
            }

            events.clear();
            guard.host.poll_events(&mut events);
            let mut closed = false;
            for ev in events.drain(..) {
                match ev {
                    SceneEvent::PointerMove(p) => pointer.move_to(p),
                    SceneEvent::PointerLeave => pointer.leave(),
                    SceneEvent::Resize(viewport) => {
                        surface.resize(viewport)?;
                        scene.resize(viewport);
                    }
                    SceneEvent::Close => closed = true,
                }
            }
            if closed {
                break ExitReason::Closed;
            }
            // Listeners may have cancelled while we were polling.
            if self.token.is_cancelled() {
                break ExitReason::Cancelled;
            }

            scene.step();
            scene.render(&mut surface);
            let rgba = surface.finish();
            guard.host.present(&rgba)?;
            frame.0 += 1;
        };

        tracing::debug!(frames = frame.0, ?reason, "frame loop finished");
        Ok(LoopExit {
            frames: frame.0,
            reason,
        })
    }
}

/// Off-screen host that keeps the last presented frame.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pending: Vec<SceneEvent>,
    last_frame: Option<FrameRGBA>,
    presented: u64,
    detached: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` on the next poll.
    pub fn push_event(&mut self, event: SceneEvent) {
        self.pending.push(event);
    }

    /// Most recently presented frame.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }

    /// Take ownership of the most recently presented frame.
    pub fn take_last_frame(&mut self) -> Option<FrameRGBA> {
        self.last_frame.take()
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl SceneHost for HeadlessHost {
    fn poll_events(&mut self, out: &mut Vec<SceneEvent>) {
        out.append(&mut self.pending);
    }

    fn present(&mut self, frame: &FrameRGBA) -> DoodleResult<()> {
        self.last_frame = Some(frame.clone());
        self.presented += 1;
        Ok(())
    }

    fn wait_for_frame(&mut self) -> bool {
        !self.detached
    }

    fn detach(&mut self) {
        self.detached = true;
        self.pending.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/frame_loop.rs"]
mod tests;
