use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="info-page">
            <h1>"Page not found"</h1>
            <p>"The page you were looking for does not exist."</p>
            <a class="btn" href="/">
                "Back home"
            </a>
        </div>
    }
}
