use gloo_timers::callback::Timeout;
use log::{error, info};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;
use crate::sheets::client::{SheetClient, SubmitOutcome};
use crate::sheets::models::DemoBooking;
use crate::sheets::validation::validate_booking;

const SUCCESS_VISIBLE_MS: u32 = 5_000;

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Name,
    Phone,
    Email,
    Message,
}

fn set_field(booking: &mut DemoBooking, field: Field, value: String) {
    match field {
        Field::Name => booking.name = value,
        Field::Phone => booking.phone = value,
        Field::Email => booking.email = value,
        Field::Message => booking.message = value,
    }
}

#[function_component(Contact)]
pub fn contact() -> Html {
    let form = use_state(DemoBooking::default);
    let loading = use_state(|| false);
    let success = use_state(|| false);
    let error = use_state(|| None::<String>);
    let hide_success = use_mut_ref(|| None::<Timeout>);

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = match field {
                Field::Message => e.target_unchecked_into::<HtmlTextAreaElement>().value(),
                _ => e.target_unchecked_into::<HtmlInputElement>().value(),
            };
            let mut next = (*form).clone();
            set_field(&mut next, field, value);
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let loading = loading.clone();
        let success = success.clone();
        let error = error.clone();
        let hide_success = hide_success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            let booking = (*form).clone();
            if let Err(e) = validate_booking(&booking) {
                error.set(Some(e.to_string()));
                return;
            }
            error.set(None);
            loading.set(true);

            let form = form.clone();
            let loading = loading.clone();
            let success = success.clone();
            let error = error.clone();
            let hide_success = hide_success.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match SheetClient::default().add_demo_booking(&booking).await {
                    SubmitOutcome::Submitted => {
                        info!("Demo booking sent for {}", booking.name);
                        form.set(DemoBooking::default());
                        success.set(true);
                        let success = success.clone();
                        *hide_success.borrow_mut() =
                            Some(Timeout::new(SUCCESS_VISIBLE_MS, move || success.set(false)));
                    }
                    SubmitOutcome::Invalid(reason) => error.set(Some(reason)),
                    SubmitOutcome::Unreachable(reason) => {
                        error!("Demo booking not sent: {}", reason);
                        error.set(Some("System connection error. Please try again later.".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <section id="contact" class="contact">
            <div class="contact-info reveal reveal-left">
                <h2 class="section-title">{"Ready to Build the Future?"}</h2>
                <p>{"Book your free 15-minute discovery call to see how automation can fit your business."}</p>
                <div class="contact-item">
                    <h4>{"Call Us"}</h4>
                    <a href={format!("tel:{}", config::PHONE_NUMBER)}>{config::PHONE_NUMBER}</a>
                    <a href={format!("tel:{}", config::PHONE_NUMBER_2)}>{config::PHONE_NUMBER_2}</a>
                </div>
                <div class="contact-item">
                    <h4>{"Email"}</h4>
                    <a href={format!("mailto:{}", config::EMAIL)}>{config::EMAIL}</a>
                </div>
                <div class="contact-item">
                    <h4>{"Visit"}</h4>
                    <span>{config::ADDRESS}</span>
                </div>
            </div>
            <div class="contact-form-panel reveal reveal-right">
                {
                    if *success {
                        html! {
                            <div class="contact-success">
                                <h3>{"Request Sent"}</h3>
                                <p>{"Our team will reach out to you shortly."}</p>
                            </div>
                        }
                    } else {
                        html! {
                            <form class="contact-form" {onsubmit}>
                                <input
                                    type="text"
                                    placeholder="Your Name"
                                    value={form.name.clone()}
                                    oninput={on_input(Field::Name)}
                                />
                                <input
                                    type="tel"
                                    placeholder="10-digit Phone Number"
                                    value={form.phone.clone()}
                                    oninput={on_input(Field::Phone)}
                                />
                                <input
                                    type="email"
                                    placeholder="Business Email"
                                    value={form.email.clone()}
                                    oninput={on_input(Field::Email)}
                                />
                                <textarea
                                    placeholder="What would you like to automate?"
                                    value={form.message.clone()}
                                    oninput={on_input(Field::Message)}
                                />
                                {
                                    if let Some(message) = (*error).as_ref() {
                                        html! { <div class="form-error">{message.clone()}</div> }
                                    } else {
                                        html! {}
                                    }
                                }
                                <button type="submit" class="contact-submit" disabled={*loading}>
                                    { if *loading { "Sending..." } else { "Book Free Demo" } }
                                </button>
                            </form>
                        }
                    }
                }
            </div>
        </section>
    }
}
