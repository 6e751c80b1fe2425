//! rdp-input-bridge library crate.
//!
//! Turns browser mouse, wheel and keyboard events into ordered input
//! transactions for a remote-desktop session engine, and manages that
//! engine's session on behalf of the page.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser (DOM events, canvas)
//!         ↓
//! [rdp-input-bridge]
//!   ├── domain/           Event snapshots, Config, CursorStyle, channel payloads
//!   ├── application/      Keyboard policy, pointer translation, SessionAdapter,
//!   │                     engine traits (SessionConnector, RemoteSession)
//!   └── infrastructure/
//!         ├── settings/   TOML settings file
//!         ├── recording/  JSON-lines event recordings
//!         ├── loopback/   Recording engine for replay and tests
//!         └── surface/    Headless render surface, error reporter
//!         ↓
//! Session engine (remote desktop protocol)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `rdp-input-core`; the engine is
//!   reached only through traits.
//! - `infrastructure` implements those traits and owns all file access.

pub mod domain;

pub mod application;

pub mod infrastructure;
