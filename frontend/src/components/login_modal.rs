use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::sheets::login::validate_login;

#[derive(Properties, PartialEq)]
pub struct LoginModalProps {
    pub on_close: Callback<()>,
    pub on_success: Callback<String>,
}

fn bind(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

#[function_component(LoginModal)]
pub fn login_modal(props: &LoginModalProps) -> Html {
    let username = use_state(String::new);
    let user_id = use_state(String::new);
    let password = use_state(String::new);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let username = username.clone();
        let user_id = user_id.clone();
        let password = password.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_success = props.on_success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            loading.set(true);
            error.set(None);

            let username = (*username).clone();
            let user_id = (*user_id).clone();
            let password = (*password).clone();
            let loading = loading.clone();
            let error = error.clone();
            let on_success = on_success.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match validate_login(&username, &user_id, &password).await {
                    Ok(user) => on_success.emit(user),
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal-backdrop" onclick={close.clone()}></div>
            <div class="modal-content login-modal">
                <button class="modal-close" onclick={close}>{"×"}</button>
                <h2>{"Admin Login"}</h2>
                <p class="modal-subtitle">{"Authorized personnel only"}</p>
                <form {onsubmit}>
                    <input
                        type="text"
                        required={true}
                        placeholder="User Name"
                        value={(*username).clone()}
                        oninput={bind(&username)}
                    />
                    <input
                        type="text"
                        required={true}
                        placeholder="User ID"
                        value={(*user_id).clone()}
                        oninput={bind(&user_id)}
                    />
                    <input
                        type="password"
                        required={true}
                        placeholder="Password"
                        value={(*password).clone()}
                        oninput={bind(&password)}
                    />
                    {
                        if let Some(message) = (*error).as_ref() {
                            html! { <div class="form-error">{message.clone()}</div> }
                        } else {
                            html! {}
                        }
                    }
                    <button type="submit" class="login-submit" disabled={*loading}>
                        { if *loading { "Verifying..." } else { "Sign In" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
