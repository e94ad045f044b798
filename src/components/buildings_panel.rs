use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::game_view::GameContext;
use super::upgrades_panel::cost_list;
use crate::model::GameAction;
use crate::state::BannerScope;

#[function_component]
pub fn BuildingsPanel() -> Html {
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };

    let on_build = {
        let ctx = ctx.clone();
        Callback::from(move |id: String| {
            let ctx = ctx.clone();
            if let Some(def) = ctx.story.buildings.get(&id) {
                ctx.dispatch(GameAction::OptimisticSpend(def.cost.clone()));
            }
            spawn_local(async move {
                match ctx.api.build_building(&id).await {
                    Ok(response) => {
                        let name = ctx.story.building_name(&id).to_string();
                        ctx.dispatch(GameAction::Built { id, response });
                        ctx.success(format!("{name} built!"), BannerScope::Game);
                        ctx.reload();
                    }
                    Err(err) => {
                        ctx.fail("build-building", &err, BannerScope::Game);
                        ctx.reload();
                    }
                }
            });
        })
    };

    let state = &*ctx.state;
    let cards = ctx.story.buildings.iter().map(|(id, def)| {
        let level = state.building_level(id);
        let unlocked = state.is_building_unlocked(id, def);
        let affordable = state.resources.can_afford(&def.cost);
        let onclick = {
            let on_build = on_build.clone();
            let id = id.clone();
            Callback::from(move |_| on_build.emit(id.clone()))
        };
        let action = if level > 0 {
            html! { <span class="badge built">{"✔ Built"}</span> }
        } else if !unlocked {
            html! { <span class="badge locked">{"🔒 Locked"}</span> }
        } else {
            html! { <button {onclick} disabled={!affordable}>{"Build"}</button> }
        };
        html! {
            <div class={classes!("card", "building-card", (!unlocked).then_some("locked"))} key={id.clone()}
                 style="display:flex; gap:10px; align-items:center; padding:8px 10px;">
                <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                    <span style="font-weight:600;">{ def.name.clone() }</span>
                    <span style="font-size:12px; opacity:0.8;">{ def.description.clone() }</span>
                    if level == 0 { { cost_list(&def.cost, &state.resources) } }
                </div>
                { action }
            </div>
        }
    });

    html! {
        <div class="panel buildings-panel" style="display:flex; flex-direction:column; gap:8px;">
            <h3 style="margin:0;">{"Buildings"}</h3>
            { for cards }
        </div>
    }
}
