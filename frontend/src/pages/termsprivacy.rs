use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::Route;

#[derive(Clone, Copy, PartialEq)]
enum LegalKind {
    Privacy,
    Terms,
}

#[derive(Properties, PartialEq)]
struct LegalPageProps {
    kind: LegalKind,
}

#[function_component(LegalPage)]
fn legal_page(props: &LegalPageProps) -> Html {
    let (title, data_section) = match props.kind {
        LegalKind::Privacy => (
            "Privacy Policy",
            "Contact form submissions (name, phone, email and message) are stored in our \
             private booking sheet and used only to get back to you. We do not sell or \
             share your data with third parties.",
        ),
        LegalKind::Terms => (
            "Terms of Service",
            "Use of our services is subject to our fair-use policy. Systems are monitored \
             for uptime and security compliance.",
        ),
    };

    html! {
        <div class="legal-container">
            <div class="legal-panel">
                <Link<Route> to={Route::Home} classes="back-link">
                    {"Back to Home"}
                </Link<Route>>
                <h1>{title}</h1>
                <section>
                    <h3>{"Summary"}</h3>
                    <p>{format!("This page describes how {} handles your information and the terms of using this site.", config::COMPANY_NAME)}</p>
                </section>
                <section>
                    <h3>{"Your Data"}</h3>
                    <p>{data_section}</p>
                </section>
                <section>
                    <h3>{"Engagements"}</h3>
                    <p>{"Custom software, automation and AI projects are governed by project-level service agreements."}</p>
                </section>
                <section>
                    <h3>{"Contact"}</h3>
                    <p>
                        {"Questions? Write to "}
                        <a href={format!("mailto:{}", config::EMAIL)}>{config::EMAIL}</a>
                    </p>
                </section>
            </div>
        </div>
    }
}

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    html! { <LegalPage kind={LegalKind::Privacy} /> }
}

#[function_component(TermsAndConditions)]
pub fn terms_and_conditions() -> Html {
    html! { <LegalPage kind={LegalKind::Terms} /> }
}
