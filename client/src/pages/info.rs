//! Static informational pages: about, programs, FAQ, contact, and legal.

use leptos::prelude::*;

pub(crate) const CONTACT_EMAIL: &str = "hello@mentorhub.example";

/// (name, duration, summary)
const PROGRAMS: &[(&str, &str, &str)] = &[
    ("Software Engineering Foundations", "12 weeks", "Version control, testing, and shipping small services."),
    ("Data Analysis", "10 weeks", "SQL, notebooks, and telling stories with data."),
    ("Product Design", "8 weeks", "Research, prototyping, and usability testing."),
];

const FAQ: &[(&str, &str)] = &[
    (
        "Who can join as a student?",
        "Anyone ready to commit a few hours each week. Register, complete your profile, and an administrator places you in a cohort.",
    ),
    (
        "How are mentors matched?",
        "Administrators match students to mentors based on expertise and each mentor's mentee capacity.",
    ),
    (
        "Can I sign in with Google?",
        "Yes. Use the Google button on the sign-in page; you will be asked to complete your profile on first sign-in.",
    ),
    ("Is there a cost?", "Programs are free for accepted students. Mentors volunteer their time."),
];

#[component]
fn InfoPage(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="info-page">
            <h1>{title}</h1>
            {children()}
        </div>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <InfoPage title="About MentorHub">
            <p>
                "MentorHub runs cohort-based mentorship programs. Students learn by doing, with a mentor who has done it before."
            </p>
            <p>"Programs are organised by a small team of administrators who manage cohorts, matches, and assignments."</p>
        </InfoPage>
    }
}

#[component]
pub fn ProgramsPage() -> impl IntoView {
    let cards = PROGRAMS
        .iter()
        .map(|(name, duration, summary)| {
            view! {
                <article class="program-card">
                    <h2>{*name}</h2>
                    <p class="program-card__duration">{*duration}</p>
                    <p>{*summary}</p>
                </article>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <InfoPage title="Programs">
            <div class="program-grid">{cards}</div>
            <a class="btn btn--primary" href="/register/student">
                "Apply now"
            </a>
        </InfoPage>
    }
}

#[component]
pub fn FaqPage() -> impl IntoView {
    let entries = FAQ
        .iter()
        .map(|(question, answer)| {
            view! {
                <details class="faq-entry">
                    <summary>{*question}</summary>
                    <p>{*answer}</p>
                </details>
            }
        })
        .collect::<Vec<_>>();

    view! { <InfoPage title="Frequently asked questions">{entries}</InfoPage> }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <InfoPage title="Contact">
            <p>"Questions about a program or partnership? Email us and we will reply within two business days."</p>
            <a class="btn btn--primary" href=format!("mailto:{CONTACT_EMAIL}")>
                {CONTACT_EMAIL}
            </a>
        </InfoPage>
    }
}

#[component]
pub fn PrivacyPage() -> impl IntoView {
    view! {
        <InfoPage title="Privacy policy">
            <p>
                "We store the profile details you provide (name, role, optional phone and bio) to run the program. Sign-in is handled by our identity provider; we never see your password."
            </p>
            <p>"A sign-in session is kept in your browser's local storage until you sign out."</p>
            <p>{format!("To request deletion of your data, email {CONTACT_EMAIL}.")}</p>
        </InfoPage>
    }
}

#[component]
pub fn TermsPage() -> impl IntoView {
    view! {
        <InfoPage title="Terms of service">
            <p>"By registering you agree to take part in good faith and to treat mentors and peers with respect."</p>
            <p>"Accounts that misuse the platform may be suspended by an administrator."</p>
        </InfoPage>
    }
}
