//! # air-canvas
//!
//! Draw in the air: a hand recognizer reports a fingertip position and a
//! finger pose every camera frame, and this crate turns that noisy stream
//! into clean ink on a persistent canvas blended over the live video.
//!
//! ## Gesture → action
//!
//! | Pose | Label | Action |
//! |---|---|---|
//! | Index finger only | `draw` | Ink follows the fingertip |
//! | All four fingers curled | `fist` | Pen up |
//! | Open palm | `clear` | Wipe the canvas once |
//! | Anything else | `idle` | Pen up |
//!
//! Per frame: [`smoother`] → [`debounce`] → [`stroke`] (writes [`canvas`])
//! → [`compositor`] (reads [`canvas`]); [`pipeline::Pipeline`] owns them all.

pub mod camera;
pub mod canvas;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod debounce;
pub mod draw;
pub mod error;
pub mod gesture;
pub mod pipeline;
pub mod replay;
pub mod smoother;
pub mod stroke;
pub mod types;

pub use error::Error;
