//! Logout route: ends the session, then returns to the login page.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;

#[component]
pub fn LogoutPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let failure = RwSignal::new(None::<String>);
    let login = auth.config().routes.login.clone();

    #[cfg(feature = "hydrate")]
    {
        let login = login.clone();
        Effect::new(move || {
            let auth = auth.clone();
            let navigate = navigate.clone();
            let login = login.clone();
            leptos::task::spawn_local(async move {
                match auth.sign_out().await {
                    Ok(()) => navigate(&login, NavigateOptions { replace: true, ..NavigateOptions::default() }),
                    Err(e) => {
                        log::warn!("sign-out failed: {e}");
                        let _ = failure.try_set(Some(e.to_string()));
                    }
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (&auth, &navigate);
    }

    view! {
        <div class="login-page">
            <div class="login-card">
                {move || match failure.get() {
                    None => view! { <p class="login-message">"Signing out..."</p> }.into_any(),
                    Some(message) => {
                        view! {
                            <p class="login-message login-message--error" role="alert">
                                "Sign-out failed: "
                                {message}
                            </p>
                            <a class="login-button" href=login.clone()>
                                "Back to login"
                            </a>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
