mod app;
mod config;
mod contact;
mod effects;
mod navbar;
mod notify;
mod projects;
mod scrollspy;

fn main() {
    dioxus::launch(app::App);
}
