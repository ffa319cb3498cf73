use gloo_timers::callback::Interval;
use log::error;
use yew::prelude::*;

use crate::components::carousel::{Carousel, CarouselAction};
use crate::sheets::client::SheetClient;
use crate::sheets::models::Banner;

const ROTATE_MS: u32 = 5_000;

#[function_component(Offers)]
pub fn offers() -> Html {
    let banners = use_state(Vec::<Banner>::new);
    let carousel = use_reducer(Carousel::default);

    {
        let banners = banners.clone();
        let carousel = carousel.clone();
        use_effect_with_deps(
            move |_| {
                wasm_bindgen_futures::spawn_local(async move {
                    match SheetClient::default().fetch_banners().await {
                        Ok(data) => {
                            carousel.dispatch(CarouselAction::Resize(data.len()));
                            banners.set(data);
                        }
                        Err(e) => error!("Failed to load offers: {}", e),
                    }
                });
                || ()
            },
            (),
        );
    }

    {
        let carousel = carousel.clone();
        use_effect_with_deps(
            move |len| {
                let rotation = (*len > 1).then(|| {
                    Interval::new(ROTATE_MS, move || carousel.dispatch(CarouselAction::Next))
                });
                move || drop(rotation)
            },
            banners.len(),
        );
    }

    if banners.is_empty() {
        return html! {};
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
        <section id="offers" class="offers">
            <div class="offers-label reveal reveal-up">{"Flash Offers"}</div>
            <div class="offers-frame reveal reveal-scale">
                {
                    banners.iter().enumerate().map(|(idx, banner)| {
                        let active = idx == carousel.index;
                        html! {
                            <a
                                key={banner.id.clone()}
                                href={banner.link.clone()}
                                target="_blank"
                                rel="noopener noreferrer"
                                class={classes!("offer-slide", active.then(|| "active"))}
                            >
                                {
                                    if let Some(src) = &banner.image_url {
                                        html! { <img src={src.clone()} alt={banner.title.clone()} class="offer-image" /> }
                                    } else {
                                        html! {}
                                    }
                                }
                                <div class="offer-caption">
                                    <span class="offer-tag">{"Flash Offer"}</span>
                                    <h3>{banner.title.clone()}</h3>
                                </div>
                            </a>
                        }
                    }).collect::<Html>()
                }
                {
                    if banners.len() > 1 {
                        html! {
                            <>
                                <button class="offer-nav prev" onclick={prev}>{"‹"}</button>
                                <button class="offer-nav next" onclick={next}>{"›"}</button>
                                <div class="offer-dots">
                                    {
                                        (0..banners.len()).map(|idx| {
                                            let active = idx == carousel.index;
                                            let carousel = carousel.clone();
                                            html! {
                                                <button
                                                    key={idx}
                                                    class={classes!("offer-dot", active.then(|| "active"))}
                                                    onclick={Callback::from(move |_: MouseEvent| carousel.dispatch(CarouselAction::Goto(idx)))}
                                                />
                                            }
                                        }).collect::<Html>()
                                    }
                                </div>
                            </>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </section>
    }
}
