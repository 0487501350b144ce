//! Route guard that renders its children only for permitted roles.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page wraps its body in `<RequireRole>`. The component
//! feeds the session signal, the mount debounce and the current URL into
//! [`AccessGate::evaluate`] and renders one view per [`GateState`].
//!
//! DESIGN
//! ======
//! The debounce ticks once per animation frame after hydration. On the server
//! it never ticks, so SSR output is always the checking view and hydration
//! starts from the same markup.

#[cfg(test)]
#[path = "require_role_test.rs"]
mod require_role_test;

use access::{AccessGate, AccessPolicy, DeniedNotice, GateState, MountDebounce, UnauthenticatedAction};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::status::{AccessDeniedPanel, CheckingPanel, ErrorPanel};
use crate::state::auth::{resolve_on_mount, use_auth};

/// Path plus query string of the current page, used as the post-login
/// return target.
pub(crate) fn return_target(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Which panel the gate shows for a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GateView {
    /// Spinner. Also shown while a redirect is in flight so protected
    /// content never flashes.
    Checking,
    Error,
    Denied,
    /// The wrapped page, for authorized users and public fallbacks.
    Content,
}

pub(crate) fn gate_view(state: &GateState) -> GateView {
    match state {
        GateState::Checking | GateState::Unauthenticated(UnauthenticatedAction::Redirect { .. }) => GateView::Checking,
        GateState::Error { .. } => GateView::Error,
        GateState::Unauthorized { .. } => GateView::Denied,
        GateState::Unauthenticated(UnauthenticatedAction::RenderPublic) | GateState::Authorized => GateView::Content,
    }
}

/// Gate `children` behind `policy`.
#[component]
pub fn RequireRole(policy: AccessPolicy, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    resolve_on_mount(&auth);
    let location = use_location();
    let navigate = use_navigate();
    let session = auth.session;
    let config = auth.config().clone();
    let gate = AccessGate::new(policy, config.routes.login.clone());
    let debounce = RwSignal::new(MountDebounce::new(config.gate_debounce_cycles));

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if debounce.get().is_settled() {
            return;
        }
        request_animation_frame(move || {
            let _ = debounce.try_update(|d| d.tick());
        });
    });

    let state = Memo::new(move |_| {
        let return_to = return_target(&location.pathname.get(), &location.search.get());
        session.with(|s| gate.evaluate(s, debounce.get().is_settled(), &return_to))
    });

    Effect::new(move || {
        if let GateState::Unauthenticated(UnauthenticatedAction::Redirect { target }) = state.get() {
            log::debug!("redirecting unauthenticated visitor to {target}");
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let login = config.routes.login;
    let home = config.routes.home;
    move || {
        let verdict = state.get();
        match (gate_view(&verdict), verdict) {
            (GateView::Error, GateState::Error { message }) => {
                view! { <ErrorPanel message=message login=login.clone()/> }.into_any()
            }
            (GateView::Denied, GateState::Unauthorized { current, required }) => {
                let notice = DeniedNotice::new(current, &required);
                view! { <AccessDeniedPanel notice=notice home=home.clone()/> }.into_any()
            }
            (GateView::Content, _) => children().into_any(),
            _ => view! { <CheckingPanel/> }.into_any(),
        }
    }
}
