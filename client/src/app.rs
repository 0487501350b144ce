//! Root application component with routing and the auth context provider.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::error_boundary::PortalErrorBoundary;
use crate::components::nav::PortalNav;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, logout::LogoutPage, sections::SectionPage};
use crate::state::auth::provide_auth;
use crate::state::config::portal_config;
use crate::state::sections::Section;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth context once per page load and sets up client-side
/// routing. Every section route is wrapped in its own role gate.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_auth(portal_config());

    view! {
        <Stylesheet id="leptos" href="/pkg/hrportal.css"/>
        <Title text="HR Portal"/>

        <Router>
            <PortalNav/>
            <main class="portal-main">
                <PortalErrorBoundary>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("logout") view=LogoutPage/>
                        <Route path=StaticSegment("") view=DashboardPage/>
                        <Route path=StaticSegment("profile") view=|| view! { <SectionPage section=Section::Profile/> }/>
                        <Route path=StaticSegment("recruitment") view=|| view! { <SectionPage section=Section::Recruitment/> }/>
                        <Route path=StaticSegment("payroll") view=|| view! { <SectionPage section=Section::Payroll/> }/>
                        <Route path=StaticSegment("compliance") view=|| view! { <SectionPage section=Section::Compliance/> }/>
                        <Route path=StaticSegment("reports") view=|| view! { <SectionPage section=Section::Reports/> }/>
                        <Route path=StaticSegment("careers") view=|| view! { <SectionPage section=Section::Careers/> }/>
                    </Routes>
                </PortalErrorBoundary>
            </main>
        </Router>
    }
}
