//! Value types exchanged with the remote-desktop session engine.
//!
//! The engine itself (connection negotiation, encryption, framing, rendering)
//! lives outside this workspace.  These are the plain values that cross its
//! boundary: sizes, lock-key state, extension payloads, termination info, and
//! the engine's error type.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remote desktop dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DesktopSize {
    pub width: u16,
    pub height: u16,
}

impl DesktopSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for DesktopSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Arguments for a dynamic resize of the remote desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: u32,
    pub height: u32,
    /// Scale factor in percent (e.g. `150`).
    pub scale_factor: Option<u32>,
    pub physical_width: Option<u32>,
    pub physical_height: Option<u32>,
}

impl ResizeRequest {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: Option<u32>) -> Self {
        self.scale_factor = scale_factor;
        self
    }
}

/// The four toggle states pushed to the server on lock-key synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockKeyState {
    pub scroll_lock: bool,
    pub num_lock: bool,
    pub caps_lock: bool,
    pub kana_lock: bool,
}

/// An engine extension call: an identifier plus an arbitrary JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub ident: String,
    pub value: serde_json::Value,
}

impl Extension {
    pub fn new(ident: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            ident: ident.into(),
            value,
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTerminationInfo {
    reason: String,
}

impl SessionTerminationInfo {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Coarse classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionErrorKind {
    /// Catch-all.
    General = 0,
    /// Incorrect password used.
    WrongPassword = 1,
    /// Unable to log on to the machine.
    LogonFailure = 2,
    /// Insufficient permission; the server denied access.
    AccessDenied = 3,
    /// Sending or receiving the RDCleanPath message failed.
    RdCleanPath = 4,
    /// Could not connect to the proxy.
    ProxyConnect = 5,
    /// Protocol negotiation failed.
    NegotiationFailure = 6,
}

impl fmt::Display for SessionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionErrorKind::General => "General",
            SessionErrorKind::WrongPassword => "WrongPassword",
            SessionErrorKind::LogonFailure => "LogonFailure",
            SessionErrorKind::AccessDenied => "AccessDenied",
            SessionErrorKind::RdCleanPath => "RDCleanPath",
            SessionErrorKind::ProxyConnect => "ProxyConnect",
            SessionErrorKind::NegotiationFailure => "NegotiationFailure",
        };
        f.write_str(name)
    }
}

/// An error surfaced by the session engine: a kind plus a diagnostic trace.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {backtrace}")]
pub struct SessionError {
    kind: SessionErrorKind,
    backtrace: String,
}

impl SessionError {
    pub fn new(kind: SessionErrorKind, backtrace: impl Into<String>) -> Self {
        Self {
            kind,
            backtrace: backtrace.into(),
        }
    }

    /// Shorthand for a [`SessionErrorKind::General`] error.
    pub fn general(backtrace: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::General, backtrace)
    }

    pub fn kind(&self) -> SessionErrorKind {
        self.kind
    }

    pub fn backtrace(&self) -> &str {
        &self.backtrace
    }
}
