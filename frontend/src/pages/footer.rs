use chrono::{Datelike, Utc};
use log::error;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::sheets::client::SheetClient;
use crate::sheets::models::{SocialLinks, SOCIAL_KEYS};
use crate::Route;

const SECTIONS: [(&str, &str); 4] = [
    ("Services", "services"),
    ("AI Assistant", "ai"),
    ("Testimonials", "testimonials"),
    ("Contact", "contact"),
];

fn social_label(key: &str) -> &'static str {
    match key {
        "facebook" => "Facebook",
        "instagram" => "Instagram",
        "linkedin" => "LinkedIn",
        "twitter" => "Twitter",
        "whatsapp" => "WhatsApp",
        _ => "Link",
    }
}

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    pub on_admin_login: Callback<()>,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let social = use_state(SocialLinks::default);

    {
        let social = social.clone();
        use_effect_with_deps(
            move |_| {
                wasm_bindgen_futures::spawn_local(async move {
                    match SheetClient::default().fetch_settings().await {
                        Ok(settings) => social.set(SocialLinks::from_settings(&settings)),
                        Err(e) => error!("Failed to load social links: {}", e),
                    }
                });
                || ()
            },
            (),
        );
    }

    let open_login = {
        let on_admin_login = props.on_admin_login.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_admin_login.emit(());
        })
    };

    html! {
        <footer class="site-footer">
            <div class="footer-grid">
                <div class="footer-brand">
                    <img src={config::LOGO_URL} alt={config::COMPANY_NAME} class="footer-logo" />
                    <h3>{config::COMPANY_NAME}</h3>
                    <p class="footer-tagline">{config::TAGLINE}</p>
                    <div class="footer-social">
                        {
                            SOCIAL_KEYS.iter().map(|key| html! {
                                <a
                                    key={*key}
                                    href={social.href(key)}
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class={classes!("social-link", *key)}
                                >
                                    {social_label(key)}
                                </a>
                            }).collect::<Html>()
                        }
                    </div>
                </div>
                <div class="footer-links">
                    <h4>{"Navigate"}</h4>
                    { for SECTIONS.iter().map(|(label, id)| html! { <a href={format!("/#{}", id)}>{*label}</a> }) }
                    <button class="footer-admin" onclick={open_login}>{"Admin Login"}</button>
                </div>
                <div class="footer-contact">
                    <h4>{"Contact"}</h4>
                    <a href={format!("tel:{}", config::PHONE_NUMBER)}>{config::PHONE_NUMBER}</a>
                    <a href={format!("tel:{}", config::PHONE_NUMBER_2)}>{config::PHONE_NUMBER_2}</a>
                    <a href={format!("mailto:{}", config::EMAIL)}>{config::EMAIL}</a>
                    <span>{config::ADDRESS}</span>
                </div>
            </div>
            <div class="footer-bottom">
                <span>{format!("© {} {}. All rights reserved.", Utc::now().year(), config::COMPANY_NAME)}</span>
                <div class="footer-legal">
                    <Link<Route> to={Route::Privacy} classes="footer-legal-link">{"Privacy Policy"}</Link<Route>>
                    <Link<Route> to={Route::Terms} classes="footer-legal-link">{"Terms of Service"}</Link<Route>>
                </div>
            </div>
        </footer>
    }
}
