// Crate error type. Every variant states *where* things went wrong.
// The per-frame filtering stages never produce one; only setup, I/O and
// the external camera/window/recognizer boundaries do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),   // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String),   // Opening/starting the camera failed
    #[error("Recognizer error: {0}")]
    Recognizer(String),   // Hand detection failed for a frame
    #[error("Configuration error: {0}")]
    Config(String),       // Config file could not be parsed/serialized
    #[error("Replay script error: {0}")]
    Script(String),       // Observation script was malformed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
