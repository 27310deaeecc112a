//! Generic create/edit form for admin resources.
//!
//! DESIGN
//! ======
//! Fields come from `Resource::FIELDS`; raw input is kept as `FormValues`
//! and only turned into a draft on submit, so a half-typed date or number
//! never fights the user while editing.

use leptos::prelude::*;

use crate::net::resources::{Resource, list_route};
use crate::util::forms::{FieldKind, FieldSpec, FormError, FormValues};

/// Render a form for `R` seeded from `initial`. `on_submit` receives the
/// validated draft; validation failures render inline.
pub fn resource_form<R: Resource>(
    initial: &R::Draft,
    submit_label: &'static str,
    busy: RwSignal<bool>,
    on_submit: Callback<R::Draft>,
) -> impl IntoView + use<R> {
    let values = RwSignal::new(R::draft_to_form(initial));
    let error = RwSignal::new(None::<FormError>);

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        match values.with_untracked(R::draft_from_form) {
            Ok(draft) => {
                error.set(None);
                on_submit.run(draft);
            }
            Err(e) => error.set(Some(e)),
        }
    };

    let fields = R::FIELDS
        .iter()
        .map(|field| field_row(*field, values, error))
        .collect::<Vec<_>>();

    view! {
        <form class="resource-form" on:submit=on_form_submit>
            {fields}
            <div class="resource-form__actions">
                <a class="btn" href={list_route::<R>()}>
                    "Cancel"
                </a>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Saving..." } else { submit_label }}
                </button>
            </div>
        </form>
    }
}

fn field_row(field: FieldSpec, values: RwSignal<FormValues>, error: RwSignal<Option<FormError>>) -> impl IntoView {
    let key = field.key;
    let value = move || values.with(|v| v.get(key).cloned().unwrap_or_default());
    let on_input = move |ev: leptos::ev::Event| {
        let input = event_target_value(&ev);
        values.update(|v| {
            v.insert(key.to_owned(), input);
        });
    };
    let field_error = move || {
        error
            .get()
            .filter(|e| e.field == key)
            .map(|e| e.message)
    };

    let control = match field.kind {
        FieldKind::TextArea => view! {
            <textarea class="resource-form__input" name=key rows="4" prop:value=value on:input=on_input></textarea>
        }
        .into_any(),
        kind => view! {
            <input
                class="resource-form__input"
                name=key
                type=kind.input_type()
                required=field.required
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <label class="resource-form__field" class:resource-form__field--invalid=move || field_error().is_some()>
            <span class="resource-form__label">
                {field.label}
                {field.required.then_some(" *")}
            </span>
            {control}
            <span class="resource-form__error">{field_error}</span>
        </label>
    }
}
