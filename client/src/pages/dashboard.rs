//! Dashboard page: greeting, profile summary and section shortcuts.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Any role may open it; the
//! shortcut grid shows the same sections as the navigation bar.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use access::{AccessPolicy, SessionUser};
use leptos::prelude::*;

use crate::components::require_role::RequireRole;
use crate::state::auth::use_auth;
use crate::state::sections::visible_sections;

/// Label/value rows for the profile card. Missing fields are skipped.
pub(crate) fn profile_rows(user: &SessionUser) -> Vec<(&'static str, String)> {
    let identity = &user.identity;
    let mut rows = vec![("Email", identity.email.clone()), ("Role", user.role.to_string())];
    if let Some(department) = &identity.department {
        rows.push(("Department", department.clone()));
    }
    if let Some(position) = &identity.position {
        rows.push(("Position", position.clone()));
    }
    rows
}

pub(crate) fn greeting(user: &SessionUser) -> String {
    let first = user.identity.name.split_whitespace().next().unwrap_or(&user.identity.email);
    format!("Welcome back, {first}")
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RequireRole policy=AccessPolicy::any_role()>
            <DashboardBody/>
        </RequireRole>
    }
}

#[component]
fn DashboardBody() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;

    move || {
        let Some(user) = session.with(|s| s.user.clone()) else {
            return ().into_any();
        };
        let rows = profile_rows(&user);
        let sections = visible_sections(Some(user.role));
        view! {
            <section class="dashboard">
                <h1>{greeting(&user)}</h1>
                <div class="dashboard__profile">
                    {user
                        .identity
                        .avatar_url
                        .clone()
                        .map(|src| view! { <img class="dashboard__avatar" src=src alt=""/> })}
                    <dl>
                        {rows
                            .into_iter()
                            .map(|(label, value)| view! {
                                <dt>{label}</dt>
                                <dd>{value}</dd>
                            })
                            .collect_view()}
                    </dl>
                </div>
                <div class="dashboard__grid">
                    {sections
                        .into_iter()
                        .map(|section| view! {
                            <a class="dashboard__card" href=section.path()>
                                <h2>{section.title()}</h2>
                                <p>{section.summary()}</p>
                            </a>
                        })
                        .collect_view()}
                </div>
            </section>
        }
            .into_any()
    }
}
