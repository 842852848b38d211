#![cfg_attr(not(test), no_std)]

//! E-paper text front-end: an ED047TC1 framebuffer, the text engine drawing
//! into it, and the touch plumbing feeding the render loop.

pub mod frontend;
pub mod touch;

pub use ed047tc1;
pub use inkfront_core;

pub use frontend::{Frontend, FrontendConfig, FrontendError, FrontendResult};
pub use touch::{MockTouch, TouchPoint, TouchProvider, TouchQueue, TouchRouter};
