mod api;
mod catalog;
mod components;
mod crafting;
mod engine;
mod error;
mod model;
mod quests;
mod state;
mod storage;
mod util;

fn main() {
    util::clog("lugog client starting");
    yew::Renderer::<components::app::App>::new().render();
}
