//! Login page: credential form plus the developer account picker.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards send unauthenticated visitors here with `?redirect=<path>`. After a
//! successful sign-in the page navigates back to that path, provided it is a
//! same-origin path; anything else lands on the home route.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use access::location::{REDIRECT_PARAM, safe_return_target};
use access::{AuthError, MockAccount};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::auth::{resolve_on_mount, use_auth};

/// Trim and check the form fields before calling the resolver.
pub(crate) fn validate_sign_in_input(email: &str, secret: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || secret.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), secret.to_owned()))
}

/// Message shown under the form for a failed sign-in.
pub(crate) fn sign_in_error_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials => "Invalid credentials".to_owned(),
        AuthError::Service(message) => format!("Sign-in failed: {message}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    resolve_on_mount(&auth);
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let secret = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let home = auth.config().routes.home.clone();
    let target = move || query.with_untracked(|q| safe_return_target(q.get(REDIRECT_PARAM).as_deref(), &home));

    // Already signed in (production sessions survive reloads): skip the form.
    let session = auth.session;
    let navigate_signed_in = navigate.clone();
    let target_signed_in = target.clone();
    Effect::new(move || {
        if session.with(|s| !s.is_loading() && s.is_authenticated()) && !busy.get_untracked() {
            navigate_signed_in(&target_signed_in(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let auth_submit = auth.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, secret_value) = match validate_sign_in_input(&email.get(), &secret.get()) {
            Ok(values) => values,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let auth = auth_submit.clone();
            let navigate = navigate.clone();
            let destination = target();
            leptos::task::spawn_local(async move {
                match auth.sign_in(&email_value, &secret_value).await {
                    Ok(user) => {
                        log::info!("signed in as {}", user.identity.email);
                        navigate(&destination, NavigateOptions::default());
                    }
                    Err(e) => {
                        let _ = error.try_set(Some(sign_in_error_message(&e)));
                        let _ = busy.try_set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth_submit, &navigate, &target, email_value, secret_value);
        }
    };

    let show_picker = auth.config().environment.allows_mock_accounts();
    let accounts = auth.accounts().accounts().to_vec();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"HR Portal"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@company.com"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || secret.get()
                        on:input=move |ev| secret.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error" role="alert">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </Show>
                {show_picker.then(|| view! { <AccountPicker accounts=accounts email=email secret=secret/> })}
            </div>
        </div>
    }
}

/// Fixture accounts available outside production. Picking one fills the form.
#[component]
fn AccountPicker(accounts: Vec<MockAccount>, email: RwSignal<String>, secret: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="login-divider"></div>
        <p class="login-card__subtitle">"Demo accounts"</p>
        <ul class="account-picker">
            {accounts
                .into_iter()
                .map(|account| {
                    let label = account.name.clone().unwrap_or_else(|| account.email.clone());
                    let role = account.role.as_str();
                    let description = account.description.clone();
                    let on_pick = move |_| {
                        email.set(account.email.clone());
                        secret.set(account.secret.clone());
                    };
                    view! {
                        <li>
                            <button class="account-picker__item" type="button" on:click=on_pick>
                                <span class="account-picker__name">{label}</span>
                                <span class="account-picker__role">{role}</span>
                                <span class="account-picker__description">{description}</span>
                            </button>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
