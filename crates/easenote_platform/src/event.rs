//! Event loop and platform events

use crate::error::PlatformError;
use crate::window::Window;
use easenote_core::EdgeInsets;

/// Event loop abstraction
///
/// Platform-specific event loops implement this trait to provide
/// a unified interface for running the app.
pub trait EventLoop {
    /// The window type for this event loop
    type Window: Window;

    /// Run the event loop
    ///
    /// This method blocks until the application exits. The handler
    /// function is called for each event, and should return a
    /// `ControlFlow` to indicate whether to continue or exit.
    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow;
}

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue running the event loop
    #[default]
    Continue,
    /// Exit the event loop
    Exit,
}

/// Platform events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
    /// Frame tick - time to advance animations and render
    Frame {
        /// Time since the previous frame in milliseconds
        dt_ms: f32,
    },
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Viewport was resized or rotated
    Resized {
        /// New width in logical units
        width: f32,
        /// New height in logical units
        height: f32,
    },
    /// Safe-area insets changed (rotation, keyboard, split screen)
    SafeAreaChanged(EdgeInsets),
    /// Window close was requested
    CloseRequested,
}

/// Application lifecycle events
#[derive(Clone, Debug, PartialEq)]
pub enum LifecycleEvent {
    /// Bootstrap finished; the first screen may be mounted
    Ready,
    /// Application resumed (came to foreground)
    Resumed,
    /// Application suspended (went to background)
    Suspended,
}
