//! Infinite-scroll trigger geometry.

/// Distance from the bottom of the document, in pixels, at which the next
/// page is requested.
pub const SCROLL_THRESHOLD_PX: f64 = 100.0;

/// Viewport position reported by the renderer on every scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Pixels scrolled from the top of the document.
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(scroll_y: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
            document_height,
        }
    }

    /// `true` once the bottom edge of the viewport is within
    /// [`SCROLL_THRESHOLD_PX`] of the end of the document.
    #[must_use]
    pub fn is_near_bottom(&self) -> bool {
        self.scroll_y + self.viewport_height >= self.document_height - SCROLL_THRESHOLD_PX
    }
}

/// What a scroll event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// A next-page fetch was started.
    FetchStarted,
    /// Viewport is not close enough to the bottom.
    NotNearBottom,
    /// A page request is already in flight.
    AlreadyLoading,
    /// The last page has been loaded.
    Exhausted,
    /// The catalog is unmounted; the listener is gone.
    Detached,
}
