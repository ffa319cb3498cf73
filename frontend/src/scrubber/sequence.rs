use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use web_sys::{HtmlCanvasElement, HtmlElement};
use yew::prelude::*;

use super::frames::FrameSequence;
use super::gate::FrameGate;
use super::mapper::ScrollMapper;
use super::preloader::{FramePreloader, LoadTracker};
use super::renderer::CanvasRenderer;

#[derive(Properties, PartialEq)]
pub struct ScrollImageSequenceProps {
    /// Base path the zero-padded frame numbers are appended to, e.g. `/video-frames/`.
    pub src: AttrValue,
    pub frame_count: usize,
    #[prop_or(1)]
    pub start_frame: u32,
    /// Pixels of scrolling over which the sequence plays from first to last frame.
    #[prop_or(3000.0)]
    pub scroll_distance: f64,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_progress: Option<Callback<f64>>,
}

/// Which frame is showing and whether the sequence is still mounted.
/// Holds no DOM handles.
struct Playhead {
    mapper: Cell<ScrollMapper>,
    current: Cell<usize>,
    gate: FrameGate,
    resize_pending: Cell<bool>,
}

impl Playhead {
    fn new(mapper: ScrollMapper) -> Self {
        Self {
            mapper: Cell::new(mapper),
            current: Cell::new(0),
            gate: FrameGate::new(),
            resize_pending: Cell::new(false),
        }
    }

    fn seek(&self, scroll_y: f64) -> usize {
        let index = self.mapper.get().frame_index(scroll_y);
        self.current.set(index);
        index
    }

    fn set_scroll_distance(&self, scroll_distance: f64) {
        self.mapper
            .set(self.mapper.get().with_scroll_distance(scroll_distance));
    }

    /// The current frame, if it has loaded and the sequence is still mounted.
    fn drawable(&self, loaded: &LoadTracker) -> Option<usize> {
        let index = self.current.get();
        (self.gate.is_open() && loaded.is_loaded(index)).then_some(index)
    }

    /// `None` once torn down. Otherwise whether the loaded frame is the one
    /// on screen and should be painted right away.
    fn on_loaded(&self, index: usize) -> Option<bool> {
        if !self.gate.is_open() {
            return None;
        }
        Some(index == self.current.get())
    }

    fn close(&self) {
        self.gate.close();
    }
}

struct Scrubber {
    container: HtmlElement,
    renderer: CanvasRenderer,
    preloader: FramePreloader,
    playhead: Playhead,
    frame: RefCell<Option<AnimationFrame>>,
    on_progress: Option<Callback<f64>>,
}

impl Scrubber {
    fn mount(
        container: HtmlElement,
        canvas: HtmlCanvasElement,
        frames: FrameSequence,
        mapper: ScrollMapper,
        on_progress: Option<Callback<f64>>,
    ) -> Rc<Self> {
        let scrubber = Rc::new_cyclic(|weak: &Weak<Scrubber>| {
            let weak = weak.clone();
            let preloader = FramePreloader::start(&frames, move |index, progress| {
                if let Some(scrubber) = weak.upgrade() {
                    scrubber.frame_loaded(index, progress);
                }
            });
            Scrubber {
                container,
                renderer: CanvasRenderer::new(canvas),
                preloader,
                playhead: Playhead::new(mapper),
                frame: RefCell::new(None),
                on_progress,
            }
        });
        scrubber.renderer.fit_to(&scrubber.container);
        scrubber.playhead.seek(current_scroll_y());
        scrubber
    }

    fn schedule(self: &Rc<Self>, resized: bool) {
        if resized {
            self.playhead.resize_pending.set(true);
        }
        if !self.playhead.gate.request() {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            let Some(scrubber) = weak.upgrade() else {
                return;
            };
            scrubber.frame.borrow_mut().take();
            if scrubber.playhead.gate.fire() {
                scrubber.update();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn update(&self) {
        if self.playhead.resize_pending.replace(false) {
            self.renderer.fit_to(&self.container);
        }
        self.playhead.seek(current_scroll_y());
        self.draw_current();
    }

    /// Remaps the current scroll offset without reloading any frames.
    fn set_scroll_distance(self: &Rc<Self>, scroll_distance: f64) {
        self.playhead.set_scroll_distance(scroll_distance);
        self.schedule(false);
    }

    fn draw_current(&self) {
        let Some(index) = self.playhead.drawable(&self.preloader.tracker()) else {
            return;
        };
        if let Some(image) = self.preloader.ready_image(index) {
            self.renderer.draw(image);
        }
    }

    fn frame_loaded(&self, index: usize, progress: f64) {
        let Some(on_screen) = self.playhead.on_loaded(index) else {
            return;
        };
        if let Some(on_progress) = &self.on_progress {
            on_progress.emit(progress);
        }
        if on_screen {
            self.draw_current();
        }
    }

    fn teardown(&self) {
        self.playhead.close();
        self.frame.borrow_mut().take();
        log::debug!(
            "Scroll sequence torn down with {} frames loaded",
            self.preloader.loaded_count()
        );
    }
}

/// Owns the window listeners for one mounted sequence. Dropping it detaches
/// them and cancels any pending animation frame.
struct MountedScrubber {
    scrubber: Rc<Scrubber>,
    _scroll: EventListener,
    _resize: EventListener,
}

impl MountedScrubber {
    fn attach(scrubber: Rc<Scrubber>) -> Option<Self> {
        let window = web_sys::window()?;

        let on_scroll = Rc::downgrade(&scrubber);
        let scroll = EventListener::new(&window, "scroll", move |_| {
            if let Some(scrubber) = on_scroll.upgrade() {
                scrubber.schedule(false);
            }
        });

        let on_resize = Rc::downgrade(&scrubber);
        let resize = EventListener::new(&window, "resize", move |_| {
            if let Some(scrubber) = on_resize.upgrade() {
                scrubber.schedule(true);
            }
        });

        Some(Self {
            scrubber,
            _scroll: scroll,
            _resize: resize,
        })
    }
}

impl Drop for MountedScrubber {
    fn drop(&mut self) {
        self.scrubber.teardown();
    }
}

fn current_scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Canvas that plays a numbered image sequence as the page scrolls.
///
/// Changing `src`, `frame_count` or `start_frame` reloads the frames. A new
/// `scroll_distance` only remaps the scroll position.
#[function_component(ScrollImageSequence)]
pub fn scroll_image_sequence(props: &ScrollImageSequenceProps) -> Html {
    let container_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let live = use_mut_ref(Weak::<Scrubber>::new);

    {
        let container_ref = container_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let on_progress = props.on_progress.clone();
        let scroll_distance = props.scroll_distance;
        let live = live.clone();
        use_effect_with_deps(
            move |(src, frame_count, start_frame)| {
                let mounted = match (
                    container_ref.cast::<HtmlElement>(),
                    canvas_ref.cast::<HtmlCanvasElement>(),
                ) {
                    (Some(container), Some(canvas)) => {
                        let frames = FrameSequence::new(src.to_string(), *frame_count, *start_frame);
                        let mapper = ScrollMapper::new(scroll_distance, *frame_count);
                        let scrubber = Scrubber::mount(container, canvas, frames, mapper, on_progress);
                        *live.borrow_mut() = Rc::downgrade(&scrubber);
                        MountedScrubber::attach(scrubber)
                    }
                    _ => None,
                };
                move || drop(mounted)
            },
            (props.src.clone(), props.frame_count, props.start_frame),
        );
    }

    {
        let live = live.clone();
        use_effect_with_deps(
            move |scroll_distance| {
                let scrubber = live.borrow().upgrade();
                if let Some(scrubber) = scrubber {
                    scrubber.set_scroll_distance(*scroll_distance);
                }
                || ()
            },
            props.scroll_distance,
        );
    }

    html! {
        <div ref={container_ref} class={classes!("scroll-sequence", props.class.clone())}>
            <canvas ref={canvas_ref} class="scroll-sequence-canvas" />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_frame_is_not_drawn() {
        let playhead = Playhead::new(ScrollMapper::new(1000.0, 10));
        let mut tracker = LoadTracker::new(10);
        assert_eq!(playhead.seek(500.0), 4);

        tracker.mark_loaded(3);
        assert_eq!(playhead.drawable(&tracker), None);

        tracker.mark_loaded(4);
        assert_eq!(playhead.drawable(&tracker), Some(4));
    }

    #[test]
    fn loads_after_teardown_are_ignored() {
        let playhead = Playhead::new(ScrollMapper::new(1000.0, 10));
        let mut tracker = LoadTracker::new(10);
        playhead.seek(0.0);
        assert_eq!(playhead.on_loaded(0), Some(true));
        assert_eq!(playhead.on_loaded(5), Some(false));

        playhead.close();
        tracker.mark_loaded(0);
        assert_eq!(playhead.on_loaded(0), None);
        assert_eq!(playhead.drawable(&tracker), None);
        assert!(!playhead.gate.request());
    }

    #[test]
    fn new_scroll_distance_keeps_frames_and_remaps() {
        let playhead = Playhead::new(ScrollMapper::new(4000.0, 192));
        assert_eq!(playhead.seek(2500.0), 119);
        playhead.set_scroll_distance(2500.0);
        assert_eq!(playhead.seek(2500.0), 191);
        assert_eq!(playhead.mapper.get(), ScrollMapper::new(2500.0, 192));
    }
}
