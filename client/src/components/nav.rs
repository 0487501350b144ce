//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists only the sections the signed-in role may open, using the same
//! policies the route guards enforce. Links the gate would reject are not
//! shown, but the gate still checks every route on its own.

use leptos::prelude::*;

use crate::state::auth::use_auth;
use crate::state::sections::visible_sections;

#[component]
pub fn PortalNav() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let routes = auth.config().routes.clone();
    let environment = auth.config().environment;

    let role = move || session.with(|s| if s.is_loading() { None } else { s.role() });
    let user_name = move || session.with(|s| s.identity().map(|i| i.name.clone()));
    let home = routes.home.clone();
    let login = routes.login.clone();
    let logout = routes.logout;

    view! {
        <nav class="portal-nav">
            <a class="portal-nav__brand" href=home>
                "HR Portal"
            </a>
            <ul class="portal-nav__links">
                {move || {
                    visible_sections(role())
                        .into_iter()
                        .map(|section| {
                            view! {
                                <li>
                                    <a href=section.path()>{section.title()}</a>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <Show when=move || !environment.is_production()>
                <span class="portal-nav__env">{environment.as_str()}</span>
            </Show>
            <div class="portal-nav__user">
                {move || match user_name() {
                    Some(name) => {
                        view! {
                            <span class="portal-nav__name">{name}</span>
                            <a class="portal-button portal-button--secondary" href=logout.clone()>
                                "Sign out"
                            </a>
                        }
                            .into_any()
                    }
                    None => {
                        view! {
                            <a class="portal-button" href=login.clone()>
                                "Sign in"
                            </a>
                        }
                            .into_any()
                    }
                }}
            </div>
        </nav>
    }
}
