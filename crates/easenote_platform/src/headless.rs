//! Headless platform
//!
//! A window with no surface and an event loop that replays a script at a
//! fixed frame rate. Used by the simulation binary and by integration tests,
//! where wall-clock pacing would make runs nondeterministic.

use crate::error::PlatformError;
use crate::event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
use crate::window::Window;
use easenote_core::EdgeInsets;
use std::cell::Cell;

/// A window that only tracks its geometry
#[derive(Debug)]
pub struct HeadlessWindow {
    size: Cell<(f32, f32)>,
    insets: Cell<EdgeInsets>,
}

impl HeadlessWindow {
    pub fn new(width: f32, height: f32, insets: EdgeInsets) -> Self {
        Self {
            size: Cell::new((width, height)),
            insets: Cell::new(insets),
        }
    }

    fn apply(&self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized { width, height } => self.size.set((*width, *height)),
            WindowEvent::SafeAreaChanged(insets) => self.insets.set(*insets),
            WindowEvent::CloseRequested => {}
        }
    }
}

impl Window for HeadlessWindow {
    fn logical_size(&self) -> (f32, f32) {
        self.size.get()
    }

    fn safe_area_insets(&self) -> EdgeInsets {
        self.insets.get()
    }
}

/// An event delivered before a given frame
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedEvent {
    /// Frame index the event is delivered before
    pub frame: u32,
    pub event: Event,
}

impl ScriptedEvent {
    pub fn new(frame: u32, event: Event) -> Self {
        Self { frame, event }
    }
}

/// Deterministic event loop
///
/// Delivers `Lifecycle(Ready)` first (unless disabled), then for each frame
/// the scripted events due at that frame followed by `Frame { dt_ms }`.
/// Window events update the headless window before the handler sees them.
pub struct HeadlessEventLoop {
    window: HeadlessWindow,
    script: Vec<ScriptedEvent>,
    frames: u32,
    frame_dt_ms: f32,
    announce_ready: bool,
}

impl HeadlessEventLoop {
    pub fn new(window: HeadlessWindow) -> Self {
        Self {
            window,
            script: Vec::new(),
            frames: 60,
            frame_dt_ms: 1000.0 / 60.0,
            announce_ready: true,
        }
    }

    /// Number of frames to run
    pub fn frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    /// Simulated time between frames
    pub fn frame_dt_ms(mut self, dt_ms: f32) -> Self {
        self.frame_dt_ms = dt_ms;
        self
    }

    /// Whether to send `Lifecycle(Ready)` before the first frame
    pub fn announce_ready(mut self, announce: bool) -> Self {
        self.announce_ready = announce;
        self
    }

    /// Schedule an event before `frame`
    pub fn schedule(mut self, frame: u32, event: Event) -> Self {
        self.script.push(ScriptedEvent::new(frame, event));
        self
    }

    fn deliver<F>(&self, event: Event, handler: &mut F) -> ControlFlow
    where
        F: FnMut(Event, &HeadlessWindow) -> ControlFlow,
    {
        if let Event::Window(ref window_event) = event {
            self.window.apply(window_event);
        }
        handler(event, &self.window)
    }
}

impl EventLoop for HeadlessEventLoop {
    type Window = HeadlessWindow;

    fn run<F>(mut self, mut handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow,
    {
        if !self.frame_dt_ms.is_finite() || self.frame_dt_ms < 0.0 {
            return Err(PlatformError::EventLoop(format!(
                "frame interval must be non-negative, got {}",
                self.frame_dt_ms
            )));
        }

        // Stable sort keeps same-frame events in scheduling order
        self.script.sort_by_key(|e| e.frame);
        let script = std::mem::take(&mut self.script);
        let mut pending = script.into_iter().peekable();

        if self.announce_ready
            && self.deliver(Event::Lifecycle(LifecycleEvent::Ready), &mut handler)
                == ControlFlow::Exit
        {
            return Ok(());
        }

        for frame in 0..self.frames {
            while let Some(scripted) = pending.next_if(|e| e.frame <= frame) {
                if self.deliver(scripted.event, &mut handler) == ControlFlow::Exit {
                    return Ok(());
                }
            }

            let tick = Event::Frame {
                dt_ms: self.frame_dt_ms,
            };
            if self.deliver(tick, &mut handler) == ControlFlow::Exit {
                tracing::debug!(frame, "headless loop exited by handler");
                return Ok(());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_order_and_window_updates() {
        let window = HeadlessWindow::new(400.0, 800.0, EdgeInsets::ZERO);
        let event_loop = HeadlessEventLoop::new(window)
            .frames(3)
            .frame_dt_ms(10.0)
            .schedule(
                1,
                Event::Window(WindowEvent::Resized {
                    width: 800.0,
                    height: 400.0,
                }),
            );

        let mut seen = Vec::new();
        event_loop
            .run(|event, window| {
                seen.push((event, window.logical_size()));
                ControlFlow::Continue
            })
            .unwrap();

        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0].0, Event::Lifecycle(LifecycleEvent::Ready));
        assert_eq!(seen[1].0, Event::Frame { dt_ms: 10.0 });
        assert_eq!(seen[1].1, (400.0, 800.0));
        assert!(matches!(seen[2].0, Event::Window(WindowEvent::Resized { .. })));
        assert_eq!(seen[2].1, (800.0, 400.0));
        assert_eq!(seen[4].1, (800.0, 400.0));
    }

    #[test]
    fn test_exit_stops_loop() {
        let window = HeadlessWindow::new(400.0, 800.0, EdgeInsets::ZERO);
        let mut frames = 0;
        HeadlessEventLoop::new(window)
            .frames(100)
            .run(|event, _| {
                if matches!(event, Event::Frame { .. }) {
                    frames += 1;
                    if frames == 5 {
                        return ControlFlow::Exit;
                    }
                }
                ControlFlow::Continue
            })
            .unwrap();
        assert_eq!(frames, 5);
    }

    #[test]
    fn test_window_geometry() {
        let window = HeadlessWindow::new(400.0, 800.0, EdgeInsets::new(44.0, 34.0, 0.0, 0.0));
        let geometry = window.geometry().unwrap();
        assert_eq!(geometry.inset_top(), 44.0);

        window.apply(&WindowEvent::Resized {
            width: 0.0,
            height: 800.0,
        });
        assert!(window.geometry().is_err());
    }

    #[test]
    fn test_rejects_negative_interval() {
        let window = HeadlessWindow::new(400.0, 800.0, EdgeInsets::ZERO);
        let result = HeadlessEventLoop::new(window)
            .frame_dt_ms(-1.0)
            .run(|_, _| ControlFlow::Continue);
        assert!(matches!(result, Err(PlatformError::EventLoop(_))));
    }
}
