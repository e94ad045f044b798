use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::game_view::GameContext;
use crate::model::GameAction;
use crate::state::BannerScope;
use crate::util::format_number;

#[function_component]
pub fn ClickPanel() -> Html {
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };

    let onclick = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.api.click().await {
                    Ok(res) => ctx.dispatch(GameAction::Clicked(res)),
                    Err(err) => ctx.fail("click", &err, BannerScope::Game),
                }
            });
        })
    };

    html! {
        <div class="panel click-panel" style="display:flex; flex-direction:column; align-items:center; gap:8px;">
            <button class="click-button" {onclick} style="font-size:28px; padding:18px 28px; border-radius:50%;">{"💰"}</button>
            <div style="font-size:13px; opacity:0.8;">
                { format!("+{} Gooncoins per click", format_number(ctx.state.click_value)) }
            </div>
        </div>
    }
}
