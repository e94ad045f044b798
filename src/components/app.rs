use super::{game_view::GameView, idle_view::IdleView};
use crate::state::Theme;
use yew::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum View {
    Game,
    Idle,
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Game);
    let theme = use_state(Theme::load);

    // Keep the document attribute and the stored preference in step with the toggle.
    {
        use_effect_with(*theme, move |theme| {
            theme.apply();
            theme.save();
            || ()
        });
    }

    let to_game = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Game))
    };
    let to_idle = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Idle))
    };
    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| theme.set(theme.toggled()))
    };

    let content = match *view {
        View::Game => html! { <GameView /> },
        View::Idle => html! { <IdleView /> },
    };
    let tab_class = |v: View| if *view == v { "view-tab active" } else { "view-tab" };

    html! {
        <div class="app">
            <header class="top-bar" style="display:flex; align-items:center; gap:8px; padding:8px 12px;">
                <strong style="flex:1;">{"Lugog"}</strong>
                <button class={tab_class(View::Game)} onclick={to_game}>{"Game"}</button>
                <button class={tab_class(View::Idle)} onclick={to_idle}>{"Idle demo"}</button>
                <button class="theme-toggle" title="Toggle theme" onclick={toggle_theme}>{ theme.toggle_label() }</button>
            </header>
            <main style="padding:12px;">
                { content }
            </main>
        </div>
    }
}
