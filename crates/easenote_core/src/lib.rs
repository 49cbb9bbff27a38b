//! EaseNote Core
//!
//! Foundational value types shared by every EaseNote crate:
//!
//! - **Geometry**: points, sizes, rects, vectors, safe-area edge insets and
//!   2D affine transforms in device-independent units
//! - **State Machines**: small table-driven FSMs used for screen gating
//!
//! # Example
//!
//! ```rust
//! use easenote_core::fsm::StateMachine;
//!
//! const SIGNED_OUT: u32 = 0;
//! const SIGNED_IN: u32 = 1;
//! const USER: u32 = 0;
//! const NO_USER: u32 = 1;
//!
//! let mut fsm = StateMachine::builder(SIGNED_OUT)
//!     .on(SIGNED_OUT, USER, SIGNED_IN)
//!     .on(SIGNED_IN, NO_USER, SIGNED_OUT)
//!     .build();
//!
//! assert!(fsm.send(USER));
//! assert_eq!(fsm.current_state(), SIGNED_IN);
//! ```

pub mod fsm;
pub mod geometry;

pub use fsm::{EventId, StateId, StateMachine, StateMachineBuilder, Transition};
pub use geometry::{Affine2D, EdgeInsets, Point, Rect, Size, Vec2};
