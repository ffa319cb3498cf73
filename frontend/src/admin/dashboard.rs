use chrono::{DateTime, Local};
use gloo_timers::callback::Timeout;
use log::{error, info, warn};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::sheets::client::{SheetClient, SubmitOutcome};
use crate::sheets::models::{NewBanner, NewTestimonial, SocialLinks, SOCIAL_KEYS};
use crate::Route;

const SUCCESS_VISIBLE_MS: u32 = 3_000;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Clients,
    Banners,
    Social,
}

#[derive(Clone, Copy, PartialEq)]
enum Connectivity {
    Checking,
    Online,
    Offline,
}

/// Message shown after a write attempt. `None` means the write went out.
fn outcome_error(outcome: &SubmitOutcome) -> Option<String> {
    match outcome {
        SubmitOutcome::Submitted => None,
        SubmitOutcome::Invalid(reason) => Some(reason.clone()),
        SubmitOutcome::Unreachable(_) => {
            Some("Could not reach the sheet. Check your connection and try again.".to_string())
        }
    }
}

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

fn textarea_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

#[derive(Properties, PartialEq)]
pub struct AdminDashboardProps {
    pub admin_user: String,
}

#[function_component]
pub fn AdminDashboard(props: &AdminDashboardProps) -> Html {
    let tab = use_state(|| Tab::Clients);
    let client_count = use_state(|| 0usize);
    let social = use_state(SocialLinks::default);
    let connectivity = use_state(|| Connectivity::Checking);
    let last_synced = use_state(|| None::<DateTime<Local>>);
    let fetching = use_state(|| true);
    let loading = use_state(|| false);
    let success = use_state(|| false);
    let error = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);
    let success_timer = use_mut_ref(|| None::<Timeout>);

    let client_form = use_state(NewTestimonial::default);
    let banner_form = use_state(NewBanner::default);

    {
        let client_count = client_count.clone();
        let social = social.clone();
        let connectivity = connectivity.clone();
        let last_synced = last_synced.clone();
        let fetching = fetching.clone();
        use_effect_with_deps(
            move |_| {
                fetching.set(true);
                connectivity.set(Connectivity::Checking);
                wasm_bindgen_futures::spawn_local(async move {
                    let client = SheetClient::default();
                    let online = client.check_connectivity().await;
                    connectivity.set(if online {
                        Connectivity::Online
                    } else {
                        Connectivity::Offline
                    });

                    match client.fetch_testimonials().await {
                        Ok(clients) => client_count.set(clients.len()),
                        Err(e) => error!("Failed to count clients: {}", e),
                    }
                    match client.fetch_settings().await {
                        Ok(settings) => social.set(SocialLinks::from_settings(&settings)),
                        Err(e) => error!("Failed to load settings: {}", e),
                    }
                    last_synced.set(Some(Local::now()));
                    fetching.set(false);
                });
                || ()
            },
            *reload,
        );
    }

    // Shared tail of every write: flash the success flag or show the error.
    let finish = {
        let loading = loading.clone();
        let success = success.clone();
        let error = error.clone();
        let success_timer = success_timer.clone();
        Callback::from(move |outcome: SubmitOutcome| {
            loading.set(false);
            match outcome_error(&outcome) {
                None => {
                    error.set(None);
                    success.set(true);
                    let success = success.clone();
                    *success_timer.borrow_mut() =
                        Some(Timeout::new(SUCCESS_VISIBLE_MS, move || success.set(false)));
                }
                Some(message) => {
                    warn!("Sheet write not sent: {:?}", outcome);
                    error.set(Some(message));
                }
            }
        })
    };

    let refresh = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.set(*reload + 1))
    };

    let submit_client = {
        let client_form = client_form.clone();
        let loading = loading.clone();
        let reload = reload.clone();
        let finish = finish.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            loading.set(true);
            let entry = (*client_form).clone();
            let client_form = client_form.clone();
            let reload = reload.clone();
            let finish = finish.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = SheetClient::default().add_testimonial(&entry).await;
                if outcome == SubmitOutcome::Submitted {
                    info!("Client {} appended", entry.name);
                    client_form.set(NewTestimonial::default());
                    reload.set(*reload + 1);
                }
                finish.emit(outcome);
            });
        })
    };

    let submit_banner = {
        let banner_form = banner_form.clone();
        let loading = loading.clone();
        let finish = finish.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            loading.set(true);
            let entry = (*banner_form).clone();
            let banner_form = banner_form.clone();
            let finish = finish.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = SheetClient::default().add_banner(&entry).await;
                if outcome == SubmitOutcome::Submitted {
                    banner_form.set(NewBanner::default());
                }
                finish.emit(outcome);
            });
        })
    };

    let save_social = {
        let social = social.clone();
        let loading = loading.clone();
        let finish = finish.clone();
        Callback::from(move |_: MouseEvent| {
            if *loading {
                return;
            }
            loading.set(true);
            let entries = social.entries();
            let finish = finish.clone();
            wasm_bindgen_futures::spawn_local(async move {
                finish.emit(SheetClient::default().update_settings(&entries).await);
            });
        })
    };

    let tab_button = |target: Tab, label: &'static str| {
        let tab = tab.clone();
        let active = *tab == target;
        html! {
            <button
                class={classes!("tab-button", active.then(|| "active"))}
                onclick={Callback::from(move |_: MouseEvent| tab.set(target))}
            >
                {label}
            </button>
        }
    };

    let status = match *connectivity {
        Connectivity::Checking => html! { <span class="status checking">{"Checking..."}</span> },
        Connectivity::Online => html! { <span class="status online">{"Sheet online"}</span> },
        Connectivity::Offline => html! { <span class="status offline">{"Sheet offline"}</span> },
    };

    let submit_label = if *loading {
        "Sending..."
    } else if *success {
        "Request Sent"
    } else {
        "Submit"
    };

    let body = match *tab {
        Tab::Clients => html! {
            <div class="dashboard-grid">
                <form class="dashboard-form" onsubmit={submit_client}>
                    <h2 class="section-title">{"Add Client"}</h2>
                    <input
                        type="text"
                        required={true}
                        placeholder="Client Name"
                        value={client_form.name.clone()}
                        oninput={{
                            let client_form = client_form.clone();
                            Callback::from(move |e: InputEvent| {
                                client_form.set(NewTestimonial { name: input_value(e), ..(*client_form).clone() });
                            })
                        }}
                    />
                    <input
                        type="text"
                        placeholder="Logo URL (ImgBB, Drive or <img> embed)"
                        value={client_form.logo.clone()}
                        oninput={{
                            let client_form = client_form.clone();
                            Callback::from(move |e: InputEvent| {
                                client_form.set(NewTestimonial { logo: input_value(e), ..(*client_form).clone() });
                            })
                        }}
                    />
                    <textarea
                        required={true}
                        placeholder="Client Feedback"
                        value={client_form.feedback.clone()}
                        oninput={{
                            let client_form = client_form.clone();
                            Callback::from(move |e: InputEvent| {
                                client_form.set(NewTestimonial { feedback: textarea_value(e), ..(*client_form).clone() });
                            })
                        }}
                    />
                    <button type="submit" class={classes!("dashboard-submit", (*success).then(|| "success"))} disabled={*loading}>
                        {submit_label}
                    </button>
                </form>
                <div class="dashboard-health">
                    <h3>{"Database Health"}</h3>
                    <div class="health-row">
                        <span>{"Clients:"}</span>
                        <span class="health-value">{client_count.to_string()}</span>
                    </div>
                    <button class={classes!("refresh-button", (*fetching).then(|| "spinning"))} onclick={refresh.clone()}>
                        {"Refresh"}
                    </button>
                </div>
            </div>
        },
        Tab::Banners => html! {
            <form class="dashboard-form" onsubmit={submit_banner}>
                <h2 class="section-title">{"Add Banner"}</h2>
                <input
                    type="text"
                    placeholder="Banner Title"
                    value={banner_form.title.clone()}
                    oninput={{
                        let banner_form = banner_form.clone();
                        Callback::from(move |e: InputEvent| {
                            banner_form.set(NewBanner { title: input_value(e), ..(*banner_form).clone() });
                        })
                    }}
                />
                <input
                    type="text"
                    placeholder="Image URL"
                    value={banner_form.image_url.clone()}
                    oninput={{
                        let banner_form = banner_form.clone();
                        Callback::from(move |e: InputEvent| {
                            banner_form.set(NewBanner { image_url: input_value(e), ..(*banner_form).clone() });
                        })
                    }}
                />
                <input
                    type="text"
                    placeholder="Link (optional)"
                    value={banner_form.link.clone()}
                    oninput={{
                        let banner_form = banner_form.clone();
                        Callback::from(move |e: InputEvent| {
                            banner_form.set(NewBanner { link: input_value(e), ..(*banner_form).clone() });
                        })
                    }}
                />
                <button type="submit" class={classes!("dashboard-submit", (*success).then(|| "success"))} disabled={*loading}>
                    {submit_label}
                </button>
            </form>
        },
        Tab::Social => html! {
            <div class="dashboard-form">
                <h2 class="section-title">{"Social Links"}</h2>
                {
                    SOCIAL_KEYS.iter().map(|key| {
                        let social = social.clone();
                        let key = *key;
                        html! {
                            <label key={key} class="social-field">
                                <span>{format!("{} URL", key)}</span>
                                <input
                                    type="url"
                                    value={social.get(key).to_string()}
                                    oninput={Callback::from(move |e: InputEvent| {
                                        let mut next = (*social).clone();
                                        next.set(key, input_value(e));
                                        social.set(next);
                                    })}
                                />
                            </label>
                        }
                    }).collect::<Html>()
                }
                <button class={classes!("dashboard-submit", (*success).then(|| "success"))} onclick={save_social} disabled={*loading}>
                    { if *loading { "Saving..." } else if *success { "Request Sent" } else { "Save Links" } }
                </button>
            </div>
        },
    };

    html! {
        <div class="dashboard-container">
            <div class="dashboard-panel">
                <div class="panel-header">
                    <h1 class="panel-title">{format!("Welcome, {}", props.admin_user)}</h1>
                    <Link<Route> to={Route::Home} classes="back-link">
                        {"Back to Home"}
                    </Link<Route>>
                </div>
                <div class="dashboard-status">
                    {status}
                    {
                        match (*last_synced).as_ref() {
                            Some(at) => html! { <span class="last-synced">{format!("Last synced {}", at.format("%H:%M:%S"))}</span> },
                            None => html! {},
                        }
                    }
                </div>
                <div class="dashboard-tabs">
                    {tab_button(Tab::Clients, "Clients")}
                    {tab_button(Tab::Banners, "Banners")}
                    {tab_button(Tab::Social, "Social")}
                </div>
                {
                    if let Some(message) = (*error).as_ref() {
                        html! { <div class="info-section error"><span class="error-message">{message.clone()}</span></div> }
                    } else {
                        html! {}
                    }
                }
                {body}
            </div>
        </div>
    }
}
