//! Gated section pages.

use access::Role;
use leptos::prelude::*;

use crate::components::require_role::RequireRole;
use crate::state::auth::use_auth;
use crate::state::sections::Section;

#[component]
pub fn SectionPage(section: Section) -> impl IntoView {
    view! {
        <RequireRole policy=section.policy()>
            <SectionBody section=section/>
        </RequireRole>
    }
}

#[component]
fn SectionBody(section: Section) -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let login = auth.config().routes.login.clone();
    let anonymous = move || session.with(|s| s.user.is_none());
    let roles = section.roles().iter().map(|r: &Role| r.as_str()).collect::<Vec<_>>().join(", ");

    view! {
        <section class="section-page">
            <h1>{section.title()}</h1>
            <p class="section-page__summary">{section.summary()}</p>
            <div class="section-page__grid">
                {section
                    .highlights()
                    .iter()
                    .map(|(label, value)| view! {
                        <div class="section-page__card">
                            <span class="section-page__value">{*value}</span>
                            <span class="section-page__label">{*label}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
            <p class="section-page__roles">"Available to: " {roles}</p>
            <Show when=anonymous>
                <a class="portal-button" href=login.clone()>
                    "Sign in for more"
                </a>
            </Show>
        </section>
    }
}
