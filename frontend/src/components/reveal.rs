use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MutationObserver, MutationObserverInit, MutationRecord,
};
use yew::prelude::*;

const REVEAL_CLASS: &str = "reveal";
const ACTIVE_CLASS: &str = "active";
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

struct RevealObservers {
    intersection: IntersectionObserver,
    mutation: MutationObserver,
    _on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
    _on_mutate: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl Drop for RevealObservers {
    fn drop(&mut self) {
        self.mutation.disconnect();
        self.intersection.disconnect();
    }
}

// Observes `root` and every not-yet-revealed `.reveal` below it.
fn observe_within(observer: &IntersectionObserver, root: &Element) {
    let classes = root.class_list();
    if classes.contains(REVEAL_CLASS) && !classes.contains(ACTIVE_CLASS) {
        observer.observe(root);
    }
    let selector = format!(".{}:not(.{})", REVEAL_CLASS, ACTIVE_CLASS);
    if let Ok(nodes) = root.query_selector_all(&selector) {
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                observer.observe(&element);
            }
        }
    }
}

fn install() -> Option<RevealObservers> {
    let document = web_sys::window()?.document()?;

    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    if let Err(e) = target.class_list().add_1(ACTIVE_CLASS) {
                        log::error!("Could not mark element revealed: {:?}", e);
                    }
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let intersection =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
            .map_err(|e| log::error!("IntersectionObserver unavailable: {:?}", e))
            .ok()?;

    if let Some(root) = document.document_element() {
        observe_within(&intersection, &root);
    }

    // Sections rendered later (after a sheet fetch, a tab switch) get picked up here.
    let watcher = intersection.clone();
    let on_mutate = Closure::<dyn FnMut(Array, MutationObserver)>::new(
        move |records: Array, _observer: MutationObserver| {
            for record in records.iter() {
                let Ok(record) = record.dyn_into::<MutationRecord>() else {
                    continue;
                };
                let added = record.added_nodes();
                for i in 0..added.length() {
                    if let Some(element) = added.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        observe_within(&watcher, &element);
                    }
                }
            }
        },
    );

    let mutation = MutationObserver::new(on_mutate.as_ref().unchecked_ref())
        .map_err(|e| log::error!("MutationObserver unavailable: {:?}", e))
        .ok()?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    if let Some(body) = document.body() {
        if let Err(e) = mutation.observe_with_options(&body, &init) {
            log::error!("Could not watch for new reveal targets: {:?}", e);
        }
    }

    Some(RevealObservers {
        intersection,
        mutation,
        _on_intersect: on_intersect,
        _on_mutate: on_mutate,
    })
}

/// Adds `active` to `.reveal` elements as they scroll into view. Re-scans
/// whenever `deps` changes; observers are disconnected on unmount.
#[hook]
pub fn use_reveal_on_scroll<D>(deps: D)
where
    D: PartialEq + 'static,
{
    use_effect_with_deps(
        move |_| {
            let observers = install();
            move || drop(observers)
        },
        deps,
    );
}
