use std::cell::Cell;

/// Collapses bursts of scroll/resize events into one update per animation
/// frame, and refuses all work once closed.
#[derive(Debug)]
pub struct FrameGate {
    pending: Cell<bool>,
    open: Cell<bool>,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self {
            pending: Cell::new(false),
            open: Cell::new(true),
        }
    }
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the caller must schedule an animation frame.
    /// False while one is already pending or after `close`.
    pub fn request(&self) -> bool {
        if !self.open.get() || self.pending.get() {
            return false;
        }
        self.pending.set(true);
        true
    }

    /// Called from the animation frame. Returns true when the update should run.
    pub fn fire(&self) -> bool {
        let was_pending = self.pending.replace(false);
        was_pending && self.open.get()
    }

    pub fn close(&self) {
        self.open.set(false);
        self.pending.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_requests_schedules_once() {
        let gate = FrameGate::new();
        assert!(gate.request());
        assert!(!gate.request());
        assert!(!gate.request());
        assert!(gate.fire());
        assert!(!gate.fire());
        assert!(gate.request());
    }

    #[test]
    fn closed_gate_schedules_nothing() {
        let gate = FrameGate::new();
        gate.close();
        assert!(!gate.is_open());
        assert!(!gate.request());
        assert!(!gate.fire());
    }

    #[test]
    fn frame_already_in_flight_is_dropped_after_close() {
        let gate = FrameGate::new();
        assert!(gate.request());
        gate.close();
        assert!(!gate.fire());
    }
}
