use gloo_events::EventListener;
use web_sys::{window, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::config;

const SCROLL_TOP_THRESHOLD: f64 = 400.0;

pub fn whatsapp_link(phone: &str) -> String {
    format!("https://wa.me/91{}", phone)
}

#[function_component(FloatingActions)]
pub fn floating_actions() -> Html {
    let show_scroll_top = use_state_eq(|| false);

    {
        let show_scroll_top = show_scroll_top.clone();
        use_effect_with_deps(
            move |_| {
                let listener = window().map(|w| {
                    let target = w.clone();
                    EventListener::new(&target, "scroll", move |_| {
                        let y = w.scroll_y().unwrap_or(0.0);
                        show_scroll_top.set(y > SCROLL_TOP_THRESHOLD);
                    })
                });
                move || drop(listener)
            },
            (),
        );
    }

    let scroll_to_top = Callback::from(|_: MouseEvent| {
        if let Some(w) = window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            w.scroll_to_with_scroll_to_options(&options);
        }
    });

    html! {
        <div class="floating-actions">
            {
                if *show_scroll_top {
                    html! {
                        <button class="floating-button scroll-top" onclick={scroll_to_top} title="Back to top">
                            {"↑"}
                        </button>
                    }
                } else {
                    html! {}
                }
            }
            <a
                href={format!("tel:{}", config::PHONE_NUMBER)}
                class="floating-button call"
                title="Call us"
            >
                {"Call"}
            </a>
            <a
                href={whatsapp_link(config::PHONE_NUMBER)}
                target="_blank"
                rel="noopener noreferrer"
                class="floating-button whatsapp"
                title="Chat on WhatsApp"
            >
                {"WhatsApp"}
            </a>
        </div>
    }
}
