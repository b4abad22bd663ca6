/// Skips redraws while nothing on screen changes.
///
/// A board at rest only needs repainting when its fingerprint changes, or at
/// most once per `min_static_interval_ms` to keep the clock fresh.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Force the next call to render.
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }

    /// Decide whether to render a new frame.
    ///
    /// - `is_static == false` (an animation is playing): always render.
    /// - Otherwise render on a fingerprint change, or once the interval elapses.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if self.has_rendered && is_static && !changed && !stale {
            return false;
        }

        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }
}
