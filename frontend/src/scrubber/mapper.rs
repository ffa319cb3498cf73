/// Maps a window scroll offset onto a frame of the sequence.
///
/// `scroll_distance` is the number of pixels over which the whole sequence
/// plays; scrolling past it pins the last frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMapper {
    scroll_distance: f64,
    frame_count: usize,
}

impl ScrollMapper {
    pub fn new(scroll_distance: f64, frame_count: usize) -> Self {
        Self {
            scroll_distance,
            frame_count,
        }
    }

    /// Same sequence played over a different scroll length.
    pub fn with_scroll_distance(self, scroll_distance: f64) -> Self {
        Self {
            scroll_distance,
            ..self
        }
    }

    /// Scroll progress clamped to `[0, 1]`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        if !scroll_y.is_finite() {
            return 0.0;
        }
        if !(self.scroll_distance.is_finite() && self.scroll_distance > 0.0) {
            return if scroll_y > 0.0 { 1.0 } else { 0.0 };
        }
        (scroll_y / self.scroll_distance).clamp(0.0, 1.0)
    }

    pub fn frame_index(&self, scroll_y: f64) -> usize {
        if self.frame_count == 0 {
            return 0;
        }
        let last = self.frame_count - 1;
        let index = (self.progress(scroll_y) * last as f64).floor() as usize;
        index.min(last)
    }
}
