use gloo_net::http::Request;
use log::error;
use serde::{Deserialize, Serialize};
use web_sys::{HtmlElement, HtmlInputElement};
use yew::prelude::*;

use crate::config;

// Shown when the backend itself cannot be reached.
const UNREACHABLE_REPLY: &str =
    "The system is currently syncing. Reach out to ZENTRIX at 7089935002 for immediate assistance.";

const SUGGESTIONS: [&str; 3] = ["How to save money?", "Automate my shop", "I need a website"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Serialize)]
struct ConsultantRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct ConsultantReply {
    reply: String,
}

async fn ask(prompt: &str) -> String {
    let request = match Request::post(&format!("{}/api/consultant", config::get_backend_url()))
        .json(&ConsultantRequest { prompt })
    {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to encode consultant prompt: {}", e);
            return UNREACHABLE_REPLY.to_string();
        }
    };
    match request.send().await {
        Ok(response) if response.ok() => match response.json::<ConsultantReply>().await {
            Ok(body) => body.reply,
            Err(e) => {
                error!("Unexpected consultant response: {}", e);
                UNREACHABLE_REPLY.to_string()
            }
        },
        Ok(response) => {
            error!("Consultant answered with status {}", response.status());
            UNREACHABLE_REPLY.to_string()
        }
        Err(e) => {
            error!("Consultant unreachable: {}", e);
            UNREACHABLE_REPLY.to_string()
        }
    }
}

#[function_component(Consultant)]
pub fn consultant() -> Html {
    let prompt = use_state(String::new);
    let messages = use_state(Vec::<ChatMessage>::new);
    let loading = use_state(|| false);
    let transcript_ref = use_node_ref();

    {
        let transcript_ref = transcript_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(transcript) = transcript_ref.cast::<HtmlElement>() {
                    transcript.set_scroll_top(transcript.scroll_height());
                }
                || ()
            },
            (messages.len(), *loading),
        );
    }

    let oninput = {
        let prompt = prompt.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            prompt.set(input.value());
        })
    };

    let onsubmit = {
        let prompt = prompt.clone();
        let messages = messages.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = (*prompt).clone();
            if text.trim().is_empty() || *loading {
                return;
            }
            prompt.set(String::new());

            let mut history = (*messages).clone();
            history.push(ChatMessage {
                speaker: Speaker::User,
                text: text.clone(),
            });
            messages.set(history.clone());
            loading.set(true);

            let messages = messages.clone();
            let loading = loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let reply = ask(&text).await;
                history.push(ChatMessage {
                    speaker: Speaker::Assistant,
                    text: reply,
                });
                messages.set(history);
                loading.set(false);
            });
        })
    };

    html! {
        <section id="ai" class="consultant">
            <div class="consultant-intro reveal reveal-left">
                <span class="section-kicker">{"AI Assistant"}</span>
                <h3>{"Ask "}<span class="accent">{config::COMPANY_NAME}</span>{" Expert."}</h3>
                <p>{"Tell our AI about your business problems and it will suggest the best solutions for you."}</p>
                <div class="consultant-tags">
                    { for SUGGESTIONS.iter().map(|tag| html! { <span class="consultant-tag">{*tag}</span> }) }
                </div>
            </div>
            <div class="consultant-panel reveal reveal-right stagger-1">
                <div class="consultant-transcript" ref={transcript_ref}>
                    {
                        if messages.is_empty() {
                            html! { <div class="consultant-empty">{"Start Conversation"}</div> }
                        } else {
                            html! {}
                        }
                    }
                    {
                        messages.iter().enumerate().map(|(i, msg)| {
                            let class = match msg.speaker {
                                Speaker::User => "chat-message user",
                                Speaker::Assistant => "chat-message assistant",
                            };
                            html! { <div key={i} class={class}>{msg.text.clone()}</div> }
                        }).collect::<Html>()
                    }
                    {
                        if *loading {
                            html! { <div class="chat-message assistant typing"><span></span><span></span><span></span></div> }
                        } else {
                            html! {}
                        }
                    }
                </div>
                <form class="consultant-form" {onsubmit}>
                    <input
                        type="text"
                        value={(*prompt).clone()}
                        {oninput}
                        placeholder="Query system architect..."
                    />
                    <button type="submit" disabled={*loading}>{"Send"}</button>
                </form>
            </div>
        </section>
    }
}
