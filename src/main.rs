mod app;
mod canvas;
mod commands;
mod components;
mod context_router;
mod detection;
mod overlay;
mod pages;
mod session;
mod state;
mod theme;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
