//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="home-page">
            <section class="hero">
                <h1>"Grow faster with a mentor in your corner"</h1>
                <p class="hero__lead">
                    "MentorHub pairs students with experienced practitioners in structured, cohort-based programs."
                </p>
                <div class="hero__actions">
                    <Show
                        when=move || auth.get().session.is_some()
                        fallback=|| {
                            view! {
                                <a class="btn btn--primary" href="/register/student">
                                    "Join as a student"
                                </a>
                                <a class="btn" href="/register/mentor">
                                    "Become a mentor"
                                </a>
                            }
                        }
                    >
                        <a class="btn btn--primary" href="/dashboard">
                            "Go to your dashboard"
                        </a>
                    </Show>
                </div>
            </section>
            <section class="home-page__features">
                <article>
                    <h2>"Cohorts"</h2>
                    <p>"Learn alongside peers on a shared schedule with clear start and end dates."</p>
                </article>
                <article>
                    <h2>"Mentors"</h2>
                    <p>"Every student is matched with a mentor who reviews work and unblocks progress."</p>
                </article>
                <article>
                    <h2>"Assignments"</h2>
                    <p>"Practical, deadline-driven projects that build a portfolio as you go."</p>
                </article>
            </section>
        </div>
    }
}
