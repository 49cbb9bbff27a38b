//! EaseNote Platform Abstraction Layer
//!
//! Platform-agnostic types for the inputs the app consumes from its host:
//! viewport geometry, safe-area insets, frame ticks and lifecycle events.
//!
//! # Architecture
//!
//! - [`Geometry`] - validated viewport + safe-area snapshot
//! - [`Window`] - the host surface the geometry is read from
//! - [`EventLoop`] - event delivery and frame pacing
//!
//! # Implementations
//!
//! - [`HeadlessEventLoop`] - scripted, deterministic loop for simulation and tests
//! - Mobile hosts implement [`Window`] and [`EventLoop`] over their native view
//!
//! # Example
//!
//! ```
//! use easenote_platform::prelude::*;
//!
//! let window = HeadlessWindow::new(400.0, 800.0, EdgeInsets::new(44.0, 34.0, 0.0, 0.0));
//! let event_loop = HeadlessEventLoop::new(window).frames(3);
//!
//! let mut frames = 0;
//! event_loop
//!     .run(|event, _window| {
//!         if let Event::Frame { .. } = event {
//!             frames += 1;
//!         }
//!         ControlFlow::Continue
//!     })
//!     .unwrap();
//! assert_eq!(frames, 3);
//! ```

mod error;
mod event;
mod geometry;
mod headless;
mod window;

// Re-export all public types
pub use easenote_core::EdgeInsets;
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
pub use geometry::{Geometry, Orientation};
pub use headless::{HeadlessEventLoop, HeadlessWindow, ScriptedEvent};
pub use window::Window;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
    pub use crate::geometry::{Geometry, Orientation};
    pub use crate::headless::{HeadlessEventLoop, HeadlessWindow, ScriptedEvent};
    pub use crate::window::Window;
    pub use easenote_core::EdgeInsets;
}
