use std::cell::{Ref, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use log::{error, info, warn};
use web_sys::HtmlImageElement;

use super::frames::FrameSequence;

/// Per-frame load bookkeeping. A slot goes from not-loaded to loaded at most
/// once; failed slots simply never get there.
#[derive(Clone, Debug)]
pub struct LoadTracker {
    loaded: Vec<bool>,
    loaded_count: usize,
}

impl LoadTracker {
    pub fn new(frame_count: usize) -> Self {
        Self {
            loaded: vec![false; frame_count],
            loaded_count: 0,
        }
    }

    /// Records a finished load and returns the new aggregate progress, or
    /// `None` if the slot was already loaded or does not exist.
    pub fn mark_loaded(&mut self, index: usize) -> Option<f64> {
        let slot = self.loaded.get_mut(index)?;
        if *slot {
            return None;
        }
        *slot = true;
        self.loaded_count += 1;
        Some(self.progress())
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.get(index).copied().unwrap_or(false)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn progress(&self) -> f64 {
        if self.loaded.is_empty() {
            return 0.0;
        }
        self.loaded_count as f64 / self.loaded.len() as f64
    }
}

/// Starts fetching every frame of a sequence at once and keeps the decoded
/// images around for the renderer.
pub struct FramePreloader {
    images: Vec<Option<HtmlImageElement>>,
    tracker: Rc<RefCell<LoadTracker>>,
    _listeners: Vec<EventListener>,
}

impl FramePreloader {
    /// `on_loaded(index, progress)` runs once per successfully loaded frame.
    pub fn start<F>(frames: &FrameSequence, on_loaded: F) -> Self
    where
        F: Fn(usize, f64) + 'static,
    {
        let tracker = Rc::new(RefCell::new(LoadTracker::new(frames.len())));
        if frames.is_empty() {
            warn!("Scroll sequence at {} has no frames to load", frames.base_path());
            return Self {
                images: Vec::new(),
                tracker,
                _listeners: Vec::new(),
            };
        }
        let on_loaded = Rc::new(on_loaded);
        let mut images = Vec::with_capacity(frames.len());
        let mut listeners = Vec::with_capacity(frames.len() * 2);

        for (index, url) in frames.urls().enumerate() {
            let image = match HtmlImageElement::new() {
                Ok(image) => image,
                Err(e) => {
                    error!("Could not create image element for {}: {:?}", url, e);
                    images.push(None);
                    continue;
                }
            };

            let tracker = tracker.clone();
            let on_loaded = on_loaded.clone();
            listeners.push(EventListener::new(&image, "load", move |_| {
                let progress = tracker.borrow_mut().mark_loaded(index);
                if let Some(progress) = progress {
                    on_loaded(index, progress);
                }
            }));

            let failed_url = url.clone();
            listeners.push(EventListener::new(&image, "error", move |_| {
                error!("Failed to load image: {}", failed_url);
            }));

            image.set_src(&url);
            images.push(Some(image));
        }

        info!("Started loading {} images from {}", frames.len(), frames.base_path());

        Self {
            images,
            tracker,
            _listeners: listeners,
        }
    }

    /// The image for `index`, only once it is fully decoded.
    pub fn ready_image(&self, index: usize) -> Option<&HtmlImageElement> {
        if !self.tracker.borrow().is_loaded(index) {
            return None;
        }
        self.images
            .get(index)?
            .as_ref()
            .filter(|image| image.complete() && image.natural_width() > 0)
    }

    pub fn tracker(&self) -> Ref<'_, LoadTracker> {
        self.tracker.borrow()
    }

    pub fn loaded_count(&self) -> usize {
        self.tracker.borrow().loaded_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_counts_each_frame_once() {
        let mut tracker = LoadTracker::new(4);
        assert_eq!(tracker.mark_loaded(2), Some(0.25));
        assert_eq!(tracker.mark_loaded(2), None);
        assert_eq!(tracker.mark_loaded(0), Some(0.5));
        assert_eq!(tracker.loaded_count(), 2);
        assert!(tracker.is_loaded(0));
        assert!(!tracker.is_loaded(1));
    }

    #[test]
    fn out_of_order_completion_reaches_one() {
        let mut tracker = LoadTracker::new(3);
        let mut reported = Vec::new();
        for index in [2, 0, 1] {
            reported.extend(tracker.mark_loaded(index));
        }
        assert_eq!(reported.len(), 3);
        assert!(reported.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*reported.last().unwrap(), 1.0);
    }

    #[test]
    fn unknown_slots_are_ignored() {
        let mut tracker = LoadTracker::new(2);
        assert_eq!(tracker.mark_loaded(7), None);
        assert!(!tracker.is_loaded(7));
        assert_eq!(tracker.loaded_count(), 0);
    }

    #[test]
    fn failed_slot_keeps_progress_below_one() {
        let mut tracker = LoadTracker::new(3);
        tracker.mark_loaded(0);
        tracker.mark_loaded(2);
        assert!(tracker.progress() < 1.0);
        assert!(!tracker.is_loaded(1));
    }

    #[test]
    fn empty_tracker_reports_zero() {
        assert_eq!(LoadTracker::new(0).progress(), 0.0);
    }
}
