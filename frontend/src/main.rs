use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use gloo_events::EventListener;
use web_sys::{window, MouseEvent};

mod config;
mod scrubber {
    pub mod fit;
    pub mod frames;
    pub mod gate;
    pub mod mapper;
    pub mod preloader;
    pub mod renderer;
    pub mod sequence;
}
mod sheets {
    pub mod client;
    pub mod images;
    pub mod login;
    pub mod models;
    pub mod row;
    pub mod validation;
}
mod components {
    pub mod carousel;
    pub mod floating_actions;
    pub mod login_modal;
    pub mod reveal;
}
mod pages {
    pub mod consultant;
    pub mod contact;
    pub mod footer;
    pub mod landing;
    pub mod offers;
    pub mod termsprivacy;
    pub mod testimonials;
}
mod admin {
    pub mod dashboard;
}

use pages::{
    footer::Footer,
    landing::Landing,
    termsprivacy::{PrivacyPolicy, TermsAndConditions},
};
use components::{
    floating_actions::FloatingActions,
    login_modal::LoginModal,
    reveal::use_reveal_on_scroll,
};
use admin::dashboard::AdminDashboard;

const NAV_SCROLLED_AT: f64 = 50.0;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[at("/terms")]
    Terms,
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route, admin_user: Option<String>) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing /> }
        },
        Route::Dashboard => match admin_user {
            Some(admin_user) => {
                info!("Rendering Dashboard page");
                html! { <AdminDashboard {admin_user} /> }
            }
            None => {
                info!("Dashboard requested without a session");
                html! {
                    <div class="dashboard-container">
                        <div class="dashboard-panel">
                            <h1 class="panel-title">{"Admin access required"}</h1>
                            <p>{"Sign in with Admin Login to manage the site."}</p>
                            <Link<Route> to={Route::Home} classes="back-link">
                                {"Back to Home"}
                            </Link<Route>>
                        </div>
                    </div>
                }
            }
        },
        Route::Terms => {
            info!("Rendering Terms page");
            html! { <TermsAndConditions /> }
        },
        Route::Privacy => {
            info!("Rendering Privacy page");
            html! { <PrivacyPolicy /> }
        },
        Route::NotFound => {
            info!("Unknown path, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub admin_user: Option<String>,
    pub show_login: bool,
    pub on_show_login: Callback<bool>,
    pub on_login: Callback<String>,
    pub on_logout: Callback<()>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let NavProps { admin_user, show_login, on_show_login, on_login, on_logout } = props;
    let menu_open = use_state(|| false);
    let is_scrolled = use_state_eq(|| false);
    let navigator = use_navigator();

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let listener = window().map(|w| {
                let target = w.clone();
                EventListener::new(&target, "scroll", move |_| {
                    is_scrolled.set(w.scroll_y().unwrap_or(0.0) > NAV_SCROLLED_AT);
                })
            });
            move || drop(listener)
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let open_login = {
        let on_show_login = on_show_login.clone();
        let close = close_menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            close.emit(e);
            on_show_login.emit(true);
        })
    };

    let handle_login = {
        let on_login = on_login.clone();
        let on_show_login = on_show_login.clone();
        Callback::from(move |user: String| {
            on_login.emit(user);
            on_show_login.emit(false);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Dashboard);
            }
        })
    };

    let handle_logout = {
        let on_logout = on_logout.clone();
        let close = close_menu.clone();
        Callback::from(move |e: MouseEvent| {
            close.emit(e);
            on_logout.emit(());
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <>
            <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
                <div class="nav-content">
                    <Link<Route> to={Route::Home} classes="nav-logo">
                        <img src={config::LOGO_URL} alt={config::COMPANY_NAME} class="nav-logo-image" />
                        {config::COMPANY_NAME}
                    </Link<Route>>

                    <button class="burger-menu" onclick={toggle_menu}>
                        <span></span>
                        <span></span>
                        <span></span>
                    </button>
                    <div class={menu_class}>
                        <a href="/#services" class="nav-link" onclick={close_menu.clone()}>{"Services"}</a>
                        <a href="/#ai" class="nav-link" onclick={close_menu.clone()}>{"AI Assistant"}</a>
                        <a href="/#contact" class="nav-link" onclick={close_menu.clone()}>{"Contact"}</a>
                        {
                            if admin_user.is_some() {
                                html! {
                                    <>
                                        <div onclick={close_menu.clone()}>
                                            <Link<Route> to={Route::Dashboard} classes="nav-profile-link">
                                                {"Dashboard"}
                                            </Link<Route>>
                                        </div>
                                        <button onclick={handle_logout} class="nav-logout-button">
                                            {"Logout"}
                                        </button>
                                    </>
                                }
                            } else {
                                html! {
                                    <button onclick={open_login} class="nav-login-button">
                                        {"Admin Login"}
                                    </button>
                                }
                            }
                        }
                    </div>
                </div>
            </nav>
            {
                if *show_login {
                    let on_show_login = on_show_login.clone();
                    html! {
                        <LoginModal
                            on_close={Callback::from(move |_: ()| on_show_login.emit(false))}
                            on_success={handle_login}
                        />
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}

#[function_component]
fn App() -> Html {
    // Session lives in memory only; a reload signs the admin out.
    let admin_user = use_state(|| None::<String>);
    let show_login = use_state(|| false);

    use_reveal_on_scroll(());

    let on_show_login = {
        let show_login = show_login.clone();
        Callback::from(move |show: bool| show_login.set(show))
    };
    let on_login = {
        let admin_user = admin_user.clone();
        Callback::from(move |user: String| admin_user.set(Some(user)))
    };
    let on_logout = {
        let admin_user = admin_user.clone();
        Callback::from(move |_: ()| {
            info!("Admin signed out");
            admin_user.set(None);
        })
    };
    let on_admin_login = {
        let show_login = show_login.clone();
        Callback::from(move |_: ()| show_login.set(true))
    };

    let render = {
        let admin_user = (*admin_user).clone();
        Callback::from(move |routes: Route| switch(routes, admin_user.clone()))
    };

    html! {
        <BrowserRouter>
            <Nav
                admin_user={(*admin_user).clone()}
                show_login={*show_login}
                {on_show_login}
                {on_login}
                {on_logout}
            />
            <Switch<Route> {render} />
            <Footer {on_admin_login} />
            <FloatingActions />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
