use dioxus::prelude::*;

use crate::config::use_runtime_config;
use crate::contact::ContactSection;
use crate::effects::{
    spawn_confetti, FirstVisitLoader, FloatingParticles, RevealObserver, ScrollProgressBar,
    StarField,
};
use crate::navbar::Navbar;
use crate::notify::{Notice, NotificationHost};
use crate::projects::{all_projects, education_history, SKILLS};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    let config = match config_resource() {
        None => {
            return rsx! {
                document::Title { "stellar.dev" }
                div { class: "page loading",
                    h1 { "Loading..." }
                }
            }
        }
        Some(Ok(config)) => config,
        Some(Err(message)) => {
            return rsx! {
                document::Title { "stellar.dev" }
                div { class: "page loading",
                    h1 { "Config load failed" }
                    p { "{message}" }
                }
            }
        }
    };

    use_context_provider(|| config);
    use_context_provider(|| Signal::new(None::<Notice>));

    #[cfg(target_arch = "wasm32")]
    use_effect(apply_reduced_motion_class);

    rsx! {
        document::Title { "Stellar | Portfolio" }
        document::Meta { name: "description", content: "Personal portfolio: projects, education, and contact." }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        FirstVisitLoader {}
        ScrollProgressBar {}
        StarField {}
        Navbar {}
        NotificationHost {}
        main {
            HeroSection {}
            AboutSection {}
            ProjectsSection {}
            EducationSection {}
            ContactSection {}
        }
        footer { class: "site-footer",
            p { "© 2026 stellar.dev — built with Rust and too much coffee." }
        }
        FloatingParticles {}
        RevealObserver {}
    }
}

#[cfg(target_arch = "wasm32")]
fn apply_reduced_motion_class() {
    if !crate::effects::reduced_motion() {
        return;
    }
    if let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    {
        let _ = body.class_list().add_1("reduced-motion");
    }
}

#[component]
fn HeroSection() -> Element {
    rsx! {
        section { id: "home", class: "hero",
            div { class: "section-inner hero-inner",
                p { class: "hero-kicker", "Hi there, I'm" }
                h1 { class: "hero-title", "Stella Berg" }
                p { class: "hero-subtitle",
                    "Full-stack developer who likes small tools, fast pages, and the occasional constellation."
                }
                div { class: "hero-actions",
                    a {
                        href: "#projects",
                        class: "btn btn-primary",
                        onclick: move |_| spawn_confetti(),
                        "View My Work"
                    }
                    a { href: "#contact", class: "btn btn-ghost", "Get In Touch" }
                }
            }
        }
    }
}

#[component]
fn AboutSection() -> Element {
    rsx! {
        section { id: "about", class: "about",
            div { class: "section-inner about-content",
                h2 { class: "section-title", "About Me" }
                p {
                    "I build web things end to end: crisp frontends, boring-on-purpose backends, and the glue in between. Lately that glue is mostly Rust compiled to WebAssembly."
                }
                p {
                    "Away from the keyboard I chase dark skies with a telescope, which explains the star field behind this page."
                }
                div { class: "skills",
                    for skill in SKILLS.iter().copied() {
                        span { class: "skill-tag", "{skill}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectsSection() -> Element {
    rsx! {
        section { id: "projects", class: "projects",
            div { class: "section-inner",
                h2 { class: "section-title", "Projects" }
                div { class: "projects-grid",
                    for project in all_projects() {
                        div { class: "project-card",
                            div { class: "project-meta",
                                h3 { class: "project-title", "{project.title}" }
                                span { class: "project-year", "{project.year}" }
                            }
                            p { class: "project-description", "{project.description}" }
                            div { class: "project-tags",
                                for tag in project.tags.iter().copied() {
                                    span { class: "project-tag", "{tag}" }
                                }
                            }
                            if let Some(link) = project.link {
                                a {
                                    href: link,
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    class: "project-link",
                                    "Source ↗"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EducationSection() -> Element {
    rsx! {
        section { id: "education", class: "education",
            div { class: "section-inner",
                h2 { class: "section-title", "Education" }
                for item in education_history() {
                    div { class: "education-item",
                        span { class: "education-years", "{item.years}" }
                        div {
                            h3 { class: "education-school", "{item.school}" }
                            p { class: "education-degree", "{item.degree}" }
                            p { class: "education-detail", "{item.detail}" }
                        }
                    }
                }
            }
        }
    }
}
