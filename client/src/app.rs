//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{ParamSegment, StaticSegment};

use crate::components::site_footer::SiteFooter;
use crate::components::site_header::SiteHeader;
use crate::components::toast_host::ToastHost;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::identity::IdentityProvider;
use crate::net::resources::Resource;
use crate::net::types::{Assignment, Cohort, Mentor, Session, Student};
use crate::pages::admin_login::AdminLoginPage;
use crate::pages::admin_resources::{edit_page, list_page, new_page};
use crate::pages::auth_callback::AuthCallbackPage;
use crate::pages::complete_profile::CompleteProfilePage;
use crate::pages::dashboard::{AdminDashboardPage, DashboardPage, MentorDashboardPage, StudentDashboardPage};
use crate::pages::home::HomePage;
use crate::pages::info::{AboutPage, ContactPage, FaqPage, PrivacyPage, ProgramsPage, TermsPage};
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::register::{MentorRegisterPage, StudentRegisterPage};
use crate::pages::signup::SignupPage;
use crate::state::admin::AdminSession;
use crate::state::auth::{AuthContext, AuthState, ProfileFetch, ProfileRequest, StateListener};
use crate::state::toast::ToastState;
use crate::util::route_guard::install_route_guard;

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

/// Build the auth context with hooks that mirror state into `auth` and run
/// the profile fetch against `api`.
fn build_auth_context(config: &ClientConfig, api: ApiClient, auth: RwSignal<AuthState>) -> AuthContext {
    let on_change: StateListener = Arc::new(move |state: &AuthState| auth.set(state.clone()));
    let request_profile: ProfileRequest = Arc::new(move |ctx: AuthContext, session: Session, fetch: ProfileFetch| {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let token = match ctx.get_token().await {
                Ok(Some(token)) => token,
                _ => session.id_token.clone(),
            };
            let result = api.fetch_profile(&session.uid, &token).await;
            ctx.resolve_profile(&fetch, result);
        });
    });
    AuthContext::new(IdentityProvider::from_client_config(config), on_change, request_profile)
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let api = ApiClient::new(config.api_base_url.clone());

    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());
    // Storage is browser-only; loaded after hydration so both renders agree.
    let admin = RwSignal::new(AdminSession::default());
    let ctx = build_auth_context(&config, api.clone(), auth);

    provide_context(auth);
    provide_context(toasts);
    provide_context(admin);
    provide_context(api);
    provide_context(ctx.clone());

    let mount_ctx = ctx.clone();
    Effect::new(move || {
        mount_ctx.mount();
        admin.set(AdminSession::load());
    });
    on_cleanup(move || ctx.teardown());

    view! {
        <Stylesheet id="leptos" href="/pkg/mentorhub.css"/>
        <Title text="MentorHub"/>

        <Router>
            <RouteGuardHost/>
            <SiteHeader/>
            <main class="site-main">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("about") view=AboutPage/>
                    <Route path=StaticSegment("programs") view=ProgramsPage/>
                    <Route path=StaticSegment("faq") view=FaqPage/>
                    <Route path=StaticSegment("contact") view=ContactPage/>
                    <Route path=StaticSegment("privacy") view=PrivacyPage/>
                    <Route path=StaticSegment("terms") view=TermsPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=(StaticSegment("register"), StaticSegment("student")) view=StudentRegisterPage/>
                    <Route path=(StaticSegment("register"), StaticSegment("mentor")) view=MentorRegisterPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                    <Route path=StaticSegment("complete-profile") view=CompleteProfilePage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("student")) view=StudentDashboardPage/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("mentor")) view=MentorDashboardPage/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("admin")) view=AdminDashboardPage/>
                    <ParentRoute path=StaticSegment("admin") view=Outlet>
                        <Route path=StaticSegment("login") view=AdminLoginPage/>
                        <Route path=StaticSegment(Student::COLLECTION) view={list_page::<Student>}/>
                        <Route path=(StaticSegment(Student::COLLECTION), StaticSegment("new")) view={new_page::<Student>}/>
                        <Route
                            path=(StaticSegment(Student::COLLECTION), ParamSegment("id"), StaticSegment("edit"))
                            view={edit_page::<Student>}
                        />
                        <Route path=StaticSegment(Mentor::COLLECTION) view={list_page::<Mentor>}/>
                        <Route path=(StaticSegment(Mentor::COLLECTION), StaticSegment("new")) view={new_page::<Mentor>}/>
                        <Route
                            path=(StaticSegment(Mentor::COLLECTION), ParamSegment("id"), StaticSegment("edit"))
                            view={edit_page::<Mentor>}
                        />
                        <Route path=StaticSegment(Cohort::COLLECTION) view={list_page::<Cohort>}/>
                        <Route path=(StaticSegment(Cohort::COLLECTION), StaticSegment("new")) view={new_page::<Cohort>}/>
                        <Route
                            path=(StaticSegment(Cohort::COLLECTION), ParamSegment("id"), StaticSegment("edit"))
                            view={edit_page::<Cohort>}
                        />
                        <Route path=StaticSegment(Assignment::COLLECTION) view={list_page::<Assignment>}/>
                        <Route
                            path=(StaticSegment(Assignment::COLLECTION), StaticSegment("new"))
                            view={new_page::<Assignment>}
                        />
                        <Route
                            path=(StaticSegment(Assignment::COLLECTION), ParamSegment("id"), StaticSegment("edit"))
                            view={edit_page::<Assignment>}
                        />
                    </ParentRoute>
                </Routes>
            </main>
            <SiteFooter/>
            <ToastHost/>
        </Router>
    }
}

/// Runs the profile-completion guard; must sit inside `<Router>`.
#[component]
fn RouteGuardHost() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_route_guard(auth, use_navigate());
}
