//! Admin list, create, and edit screens, generic over `Resource`.
//!
//! DESIGN
//! ======
//! One implementation serves all four collections; the router instantiates
//! `list_page::<Student>`, `new_page::<Cohort>`, and so on. Every request
//! authorizes with the stored admin session token.

#[cfg(test)]
#[path = "admin_resources_test.rs"]
mod admin_resources_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::admin_gate::{AdminGate, report_admin_error};
use crate::components::resource_form::resource_form;
use crate::components::resource_table::resource_table;
use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::net::resources::{Resource, list_route, new_route};
use crate::state::admin::AdminSession;
use crate::state::toast::{ToastKind, ToastState};

/// Parse the `:id` route segment.
pub(crate) fn parse_record_id(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

/// Load state of a fetched record or list.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Loaded<T> {
    Loading,
    Ready(T),
    Failed(String),
}

fn admin_token(admin: RwSignal<AdminSession>) -> Option<String> {
    admin.with_untracked(|a| a.token.clone())
}

pub fn list_page<R: Resource>() -> impl IntoView {
    view! {
        <AdminGate>
            {list_view::<R>()}
        </AdminGate>
    }
}

fn list_view<R: Resource>() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let admin = expect_context::<RwSignal<AdminSession>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let records = RwSignal::new(Loaded::<Vec<R>>::Loading);

    if let Some(token) = admin_token(admin) {
        leptos::task::spawn_local(async move {
            match api.list::<R>(&token).await {
                Ok(items) => records.set(Loaded::Ready(items)),
                Err(e) => {
                    report_admin_error(admin, toasts, &format!("load {}", R::PLURAL.to_lowercase()), &e);
                    records.set(Loaded::Failed(e.to_string()));
                }
            }
        });
    }

    view! {
        <div class="admin-page">
            <header class="admin-page__header">
                <h1>{R::PLURAL}</h1>
                <a class="btn btn--primary" href={new_route::<R>()}>
                    {format!("New {}", R::SINGULAR.to_lowercase())}
                </a>
            </header>
            {move || match records.get() {
                Loaded::Loading => view! { <p>"Loading..."</p> }.into_any(),
                Loaded::Failed(message) => view! { <p class="admin-page__error">{message}</p> }.into_any(),
                Loaded::Ready(items) => resource_table::<R>(items).into_any(),
            }}
        </div>
    }
}

pub fn new_page<R: Resource>() -> impl IntoView {
    view! {
        <AdminGate>
            {new_view::<R>()}
        </AdminGate>
    }
}

fn new_view<R: Resource>() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let admin = expect_context::<RwSignal<AdminSession>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    let on_submit = Callback::new(move |draft: R::Draft| {
        let Some(token) = admin_token(admin) else {
            return;
        };
        busy.set(true);
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.create::<R>(&token, &draft).await {
                Ok(created) => {
                    notify(toasts, ToastKind::Success, format!("{} #{} created.", R::SINGULAR, created.id()));
                    navigate(&list_route::<R>(), NavigateOptions::default());
                }
                Err(e) => report_admin_error(admin, toasts, &format!("create {}", R::SINGULAR.to_lowercase()), &e),
            }
            busy.set(false);
        });
    });

    view! {
        <div class="admin-page">
            <h1>{format!("New {}", R::SINGULAR.to_lowercase())}</h1>
            {resource_form::<R>(&R::Draft::default(), "Create", busy, on_submit)}
        </div>
    }
}

pub fn edit_page<R: Resource>() -> impl IntoView {
    view! {
        <AdminGate>
            {edit_view::<R>()}
        </AdminGate>
    }
}

fn edit_view<R: Resource>() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let admin = expect_context::<RwSignal<AdminSession>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let params = use_params_map();
    let busy = RwSignal::new(false);
    let record = RwSignal::new(Loaded::<R::Draft>::Loading);

    let id = params.with_untracked(|p| parse_record_id(p.get("id").as_deref()));
    match (id, admin_token(admin)) {
        (None, _) => record.set(Loaded::Failed(format!("Unknown {} id.", R::SINGULAR.to_lowercase()))),
        (Some(id), Some(token)) => {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.get::<R>(&token, id).await {
                    Ok(found) => record.set(Loaded::Ready(found.draft().clone())),
                    Err(e) => {
                        report_admin_error(admin, toasts, &format!("load {} #{id}", R::SINGULAR.to_lowercase()), &e);
                        record.set(Loaded::Failed(e.to_string()));
                    }
                }
            });
        }
        (Some(_), None) => {}
    }

    let on_submit = Callback::new(move |draft: R::Draft| {
        let (Some(id), Some(token)) = (id, admin_token(admin)) else {
            return;
        };
        busy.set(true);
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.update::<R>(&token, id, &draft).await {
                Ok(_) => {
                    notify(toasts, ToastKind::Success, format!("{} #{id} saved.", R::SINGULAR));
                    navigate(&list_route::<R>(), NavigateOptions::default());
                }
                Err(e) => report_admin_error(admin, toasts, &format!("update {} #{id}", R::SINGULAR.to_lowercase()), &e),
            }
            busy.set(false);
        });
    });

    view! {
        <div class="admin-page">
            <h1>{move || id.map_or_else(|| R::SINGULAR.to_owned(), |id| format!("Edit {} #{id}", R::SINGULAR.to_lowercase()))}</h1>
            {move || match record.get() {
                Loaded::Loading => view! { <p>"Loading..."</p> }.into_any(),
                Loaded::Failed(message) => view! {
                    <p class="admin-page__error">{message}</p>
                    <a href={list_route::<R>()}>{format!("Back to {}", R::PLURAL.to_lowercase())}</a>
                }
                .into_any(),
                Loaded::Ready(draft) => resource_form::<R>(&draft, "Save", busy, on_submit).into_any(),
            }}
        </div>
    }
}
