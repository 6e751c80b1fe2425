//! Infrastructure layer for the input bridge.
//!
//! Concrete implementations of the application traits plus file I/O.
//!
//! # Responsibilities
//!
//! - Loading and saving the TOML settings file
//! - Reading recorded browser events (JSON lines)
//! - A loopback session engine that records what it receives
//! - A headless render surface and a surface-backed error reporter

pub mod loopback;
pub mod recording;
pub mod settings;
pub mod surface;

pub use loopback::{LoopbackConnector, LoopbackOptions, LoopbackSession};
pub use recording::{load_recording, parse_recording, RecordingError};
pub use settings::{load_settings, save_settings, AdapterSettings, SettingsError};
pub use surface::{HeadlessSurface, SurfaceErrorReporter};
