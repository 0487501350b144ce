//! Panels the access gate shows instead of page content.

use access::DeniedNotice;
use leptos::prelude::*;

/// Shown while the session is still being resolved.
#[component]
pub fn CheckingPanel() -> impl IntoView {
    view! {
        <div class="gate-panel gate-panel--checking" role="status" aria-live="polite">
            <div class="gate-spinner"></div>
            <p>"Checking your access..."</p>
        </div>
    }
}

/// Shown when the identity service failed.
#[component]
pub fn ErrorPanel(message: String, login: String) -> impl IntoView {
    let on_retry = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        }
    };

    view! {
        <div class="gate-panel gate-panel--error" role="alert">
            <h2>"Something went wrong"</h2>
            <p class="gate-panel__message">{message}</p>
            <div class="gate-panel__actions">
                <button class="portal-button" type="button" on:click=on_retry>
                    "Retry"
                </button>
                <a class="portal-button portal-button--secondary" href=login>
                    "Go to login"
                </a>
            </div>
        </div>
    }
}

/// Shown when the signed-in role is not allowed on this page.
#[component]
pub fn AccessDeniedPanel(notice: DeniedNotice, home: String) -> impl IntoView {
    view! {
        <div class="gate-panel gate-panel--denied" role="alert">
            <h2>"Access denied"</h2>
            <p>"You do not have permission to view this page."</p>
            <p class="gate-panel__detail">{notice.current_line()}</p>
            <p class="gate-panel__detail">{notice.required_line()}</p>
            <a class="portal-button" href=home>
                "Back to dashboard"
            </a>
        </div>
    }
}
