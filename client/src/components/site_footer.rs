use leptos::prelude::*;

#[component]
pub fn SiteFooter() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <nav class="site-footer__links">
                <a href="/about">"About"</a>
                <a href="/faq">"FAQ"</a>
                <a href="/contact">"Contact"</a>
                <a href="/privacy">"Privacy"</a>
                <a href="/terms">"Terms"</a>
                <a href="/admin/login">"Admin"</a>
            </nav>
            <p class="site-footer__copy">"MentorHub"</p>
        </footer>
    }
}
