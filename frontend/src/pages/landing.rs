use gloo_events::EventListener;
use log::info;
use web_sys::window;
use yew::prelude::*;

use crate::config;
use crate::pages::consultant::Consultant;
use crate::pages::contact::Contact;
use crate::pages::offers::Offers;
use crate::pages::testimonials::Testimonials;
use crate::scrubber::sequence::ScrollImageSequence;

const SERVICES: [(&str, &str); 5] = [
    (
        "Business Website Development",
        "High-conversion websites designed to establish authority and capture leads effectively.",
    ),
    (
        "CRM + Lead Management",
        "Centralized systems to track, manage, and convert customer leads automatically.",
    ),
    (
        "Billing & Inventory Software",
        "Streamlined billing and stock management for retail and wholesale businesses.",
    ),
    (
        "WhatsApp Automation",
        "Advanced automated messaging to engage customers 24/7 on their favorite app.",
    ),
    (
        "AI Business Chatbot",
        "Intelligent AI agents that handle customer support and sales queries around the clock.",
    ),
];

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(config::MOBILE_BREAKPOINT)
}

/// Picks the scrub length for the intro: phones get a shorter scroll.
pub fn intro_scroll_distance(viewport_width: f64) -> f64 {
    if viewport_width < config::MOBILE_BREAKPOINT {
        config::INTRO_SCROLL_MOBILE
    } else {
        config::INTRO_SCROLL_DESKTOP
    }
}

#[function_component(IntroSequence)]
pub fn intro_sequence() -> Html {
    let distance = use_state_eq(|| intro_scroll_distance(viewport_width()));

    {
        let distance = distance.clone();
        use_effect_with_deps(
            move |_| {
                let listener = window().map(|w| {
                    EventListener::new(&w, "resize", move |_| {
                        distance.set(intro_scroll_distance(viewport_width()));
                    })
                });
                move || drop(listener)
            },
            (),
        );
    }

    let on_progress = Callback::from(|progress: f64| {
        if progress >= 1.0 {
            info!("Intro frames fully loaded");
        }
    });

    html! {
        <div class="intro-sequence" style={format!("height: calc(100vh + {}px)", *distance)}>
            <div class="intro-sticky">
                <ScrollImageSequence
                    src={config::INTRO_FRAMES_PATH}
                    frame_count={config::INTRO_FRAME_COUNT}
                    scroll_distance={*distance}
                    class="intro-canvas"
                    on_progress={on_progress}
                />
                <div class="intro-fade"></div>
                <div class="intro-hint">{"Scroll to Initialize"}</div>
            </div>
        </div>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    html! {
        <section id="home" class="hero">
            <div class="hero-badge reveal reveal-left">
                {format!("{}: {}", config::COMPANY_NAME, config::TAGLINE)}
            </div>
            <h1 class="hero-title reveal reveal-left stagger-1">
                {"Grow Your "}<span class="accent">{"Business"}</span>
                <br/>
                <span class="muted">{"With Smart Automation."}</span>
            </h1>
            <div class="hero-subtitle reveal reveal-left stagger-2">
                <p class="hero-services">{"Websites • CRM • Billing • WhatsApp Automation • AI Agents"}</p>
                <p>{"Helping Raipur businesses save time, increase sales and automate operations."}</p>
            </div>
            <div class="hero-actions reveal reveal-up stagger-3">
                <a href="#contact" class="hero-cta">{"Book a Free Demo"}</a>
                <a href={format!("tel:{}", config::PHONE_NUMBER)} class="hero-call">
                    {format!("Call {}", config::PHONE_NUMBER)}
                </a>
            </div>
        </section>
    }
}

#[function_component(Services)]
fn services() -> Html {
    html! {
        <section id="services" class="services">
            <h2 class="section-title reveal reveal-up">{"Our Services"}</h2>
            <div class="services-grid">
                {
                    SERVICES.iter().enumerate().map(|(i, (title, description))| {
                        html! {
                            <div key={*title} class={classes!("service-card", "reveal", "reveal-up", format!("stagger-{}", i % 3 + 1))}>
                                <h3>{*title}</h3>
                                <p>{*description}</p>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        </section>
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    html! {
        <main class="landing">
            <IntroSequence />
            <Hero />
            <Services />
            <Offers />
            <Consultant />
            <Testimonials />
            <Contact />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_viewports_get_the_short_scrub() {
        assert_eq!(intro_scroll_distance(375.0), config::INTRO_SCROLL_MOBILE);
        assert_eq!(intro_scroll_distance(767.9), config::INTRO_SCROLL_MOBILE);
        assert_eq!(intro_scroll_distance(768.0), config::INTRO_SCROLL_DESKTOP);
        assert_eq!(intro_scroll_distance(1440.0), config::INTRO_SCROLL_DESKTOP);
    }
}
