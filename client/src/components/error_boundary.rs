//! Declarative error boundary around routed pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages may return `Result` views; any error bubbles up to this boundary,
//! which swaps in a fallback panel and logs each distinct error once.

#[cfg(test)]
#[path = "error_boundary_test.rs"]
mod error_boundary_test;

use access::AuthRoutes;
use leptos::prelude::*;

use crate::state::auth::AuthContext;

/// Configured home route, or the default when no auth context is provided.
pub(crate) fn home_route() -> String {
    use_context::<AuthContext>().map_or_else(|| AuthRoutes::default().home, |auth| auth.config().routes.home.clone())
}

/// Catch descendant errors and render a fallback.
#[component]
pub fn PortalErrorBoundary(children: Children) -> impl IntoView {
    let home = home_route();
    view! {
        <ErrorBoundary fallback=move |errors| {
            let messages = move || {
                errors.get().into_iter().map(|(_, e)| e.to_string()).collect::<Vec<_>>()
            };
            let logged = messages.clone();
            Effect::new(move |seen: Option<usize>| {
                let current = logged();
                for message in current.iter().skip(seen.unwrap_or(0)) {
                    log::error!("page error: {message}");
                }
                current.len()
            });
            view! {
                <div class="gate-panel gate-panel--error" role="alert">
                    <h2>"This page failed to load"</h2>
                    <ul class="gate-panel__errors">
                        {move || messages().into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                    </ul>
                    <a class="portal-button" href=home.clone()>
                        "Back to dashboard"
                    </a>
                </div>
            }
        }>
            {children()}
        </ErrorBoundary>
    }
}
