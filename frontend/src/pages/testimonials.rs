use log::{error, info};
use yew::prelude::*;

use crate::components::carousel::{Carousel, CarouselAction};
use crate::sheets::client::SheetClient;
use crate::sheets::models::Testimonial;

const VISIBLE_CARDS: usize = 3;

/// Letter shown when a client has no usable logo.
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "Z".to_string())
}

pub fn stars(rating: u8) -> String {
    "★".repeat(rating as usize)
}

#[derive(Properties, PartialEq)]
struct LogoProps {
    src: Option<String>,
    name: String,
}

#[function_component(ClientLogo)]
fn client_logo(props: &LogoProps) -> Html {
    let failed = use_state(|| false);

    {
        let failed = failed.clone();
        use_effect_with_deps(
            move |_| {
                failed.set(false);
                || ()
            },
            props.src.clone(),
        );
    }

    match &props.src {
        Some(src) if !*failed => {
            let onerror = {
                let failed = failed.clone();
                Callback::from(move |_: Event| failed.set(true))
            };
            html! {
                <div class="client-logo">
                    <img src={src.clone()} alt={props.name.clone()} loading="lazy" {onerror} />
                </div>
            }
        }
        _ => html! {
            <div class="client-logo fallback">
                <span>{initial(&props.name)}</span>
            </div>
        },
    }
}

#[function_component(Testimonials)]
pub fn testimonials() -> Html {
    let testimonials = use_state(Testimonial::defaults);
    let carousel = use_reducer(|| Carousel {
        index: 0,
        len: Testimonial::defaults().len(),
    });

    {
        let testimonials = testimonials.clone();
        let carousel = carousel.clone();
        use_effect_with_deps(
            move |_| {
                wasm_bindgen_futures::spawn_local(async move {
                    match SheetClient::default().fetch_testimonials().await {
                        Ok(data) if !data.is_empty() => {
                            info!("Loaded {} testimonials", data.len());
                            carousel.dispatch(CarouselAction::Resize(data.len()));
                            testimonials.set(data);
                        }
                        Ok(_) => info!("No testimonials in sheet, keeping defaults"),
                        Err(e) => error!("Failed to load testimonials: {}", e),
                    }
                });
                || ()
            },
            (),
        );
    }

    let prev = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.dispatch(CarouselAction::Prev))
    };
    let next = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.dispatch(CarouselAction::Next))
    };

    html! {
        <section id="testimonials" class="testimonials">
            <div class="testimonials-header reveal reveal-up">
                <h2 class="section-title">{"Client Success Stories"}</h2>
                <div class="testimonials-nav">
                    <button class="carousel-button" onclick={prev}>{"‹"}</button>
                    <button class="carousel-button" onclick={next}>{"›"}</button>
                </div>
            </div>
            <div class="testimonials-grid">
                {
                    carousel.window(VISIBLE_CARDS).into_iter().filter_map(|i| testimonials.get(i).map(|t| (i, t))).map(|(i, t)| {
                        html! {
                            <div key={i} class="testimonial-card reveal reveal-up">
                                <ClientLogo src={t.logo.clone()} name={t.name.clone()} />
                                <div class="rating">{stars(t.rating)}</div>
                                <p class="testimonial-text">{format!("\"{}\"", t.text)}</p>
                                <div class="testimonial-author">
                                    <span class="author-name">{t.name.clone()}</span>
                                    <span class="author-role">{format!("{} · {}", t.role, t.company)}</span>
                                </div>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_first_letter_uppercased() {
        assert_eq!(initial("acme retail"), "A");
        assert_eq!(initial("  zed"), "Z");
        assert_eq!(initial(""), "Z");
        assert_eq!(initial("éclair"), "É");
    }

    #[test]
    fn rating_renders_as_stars() {
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(0), "");
    }
}
