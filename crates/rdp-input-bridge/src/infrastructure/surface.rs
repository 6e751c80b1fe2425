//! A render surface with no window behind it, and the error reporter that
//! writes to a surface.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::error;

use crate::application::engine::RenderSurface;
use crate::application::errors::{render_error_message, BridgeError, ErrorReporter};
use crate::domain::ClientRect;

#[derive(Debug, Clone)]
struct SurfaceState {
    pixel_size: (u32, u32),
    client_rect: ClientRect,
    cursor: String,
    status_text: Option<String>,
    focus_count: usize,
    rect_pinned: bool,
}

/// Keeps the surface state in memory.
///
/// The CSS box follows the pixel size unless pinned with
/// [`set_client_rect`](HeadlessSurface::set_client_rect), which is how tests
/// model a canvas rendered at a different size than its backing store.
#[derive(Debug)]
pub struct HeadlessSurface {
    state: Mutex<SurfaceState>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Mutex::new(SurfaceState {
                pixel_size: (width, height),
                client_rect: ClientRect::new(0.0, 0.0, f64::from(width), f64::from(height)),
                cursor: "default".to_string(),
                status_text: None,
                focus_count: 0,
                rect_pinned: false,
            }),
        }
    }

    pub fn set_client_rect(&self, rect: ClientRect) {
        let mut state = self.state();
        state.client_rect = rect;
        state.rect_pinned = true;
    }

    pub fn cursor(&self) -> String {
        self.state().cursor.clone()
    }

    pub fn status_text(&self) -> Option<String> {
        self.state().status_text.clone()
    }

    pub fn focus_count(&self) -> usize {
        self.state().focus_count
    }

    fn state(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

impl RenderSurface for HeadlessSurface {
    fn pixel_size(&self) -> (u32, u32) {
        self.state().pixel_size
    }

    fn set_pixel_size(&self, width: u32, height: u32) {
        let mut state = self.state();
        state.pixel_size = (width, height);
        if !state.rect_pinned {
            state.client_rect.width = f64::from(width);
            state.client_rect.height = f64::from(height);
        }
    }

    fn client_rect(&self) -> ClientRect {
        self.state().client_rect
    }

    fn focus(&self) {
        self.state().focus_count += 1;
    }

    fn set_cursor(&self, css: &str) {
        self.state().cursor = css.to_string();
    }

    fn show_status_text(&self, text: &str) {
        self.state().status_text = Some(text.to_string());
    }
}

// ── Error reporter ────────────────────────────────────────────────────────────

/// Logs every error and shows its rendered message on a surface.
pub struct SurfaceErrorReporter {
    surface: Arc<dyn RenderSurface>,
}

impl SurfaceErrorReporter {
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self { surface }
    }
}

impl ErrorReporter for SurfaceErrorReporter {
    fn report(&self, err: &BridgeError) {
        error!(error = %err, "session error");
        self.surface.show_status_text(&render_error_message(err));
    }
}
