use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::game_view::GameContext;
use crate::error::ClientError;
use crate::model::PlayerEquipment;
use crate::state::{Banner, BannerScope};

/// Looks up what another player is wearing.
#[function_component]
pub fn PlayerLookupPanel() -> Html {
    let username = use_state(String::new);
    let result = use_state(|| None::<PlayerEquipment>);
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };

    let on_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                username.set(input.value());
            }
        })
    };

    let on_view = {
        let ctx = ctx.clone();
        let username = username.clone();
        let result = result.clone();
        Callback::from(move |_| {
            let name = username.trim().to_string();
            if name.is_empty() {
                ctx.notify.emit(Banner::error("Enter a player name.", BannerScope::Game));
                return;
            }
            let ctx = ctx.clone();
            let result = result.clone();
            spawn_local(async move {
                match ctx.api.player_equipment(&name).await {
                    Ok(found) => result.set(Some(found)),
                    Err(ClientError::Http { status: 404, .. }) => {
                        result.set(None);
                        ctx.notify.emit(Banner::error("Player not found.", BannerScope::Game));
                    }
                    Err(err) => ctx.fail("player-equipment", &err, BannerScope::Game),
                }
            });
        })
    };

    let view = result.as_ref().map(|found| {
        if found.equipment.is_empty() {
            return html! { <div style="opacity:0.7;">{ format!("{} has no equipment.", found.username) }</div> };
        }
        let rows = found.equipment.iter().map(|slot| {
            html! {
                <li key={slot.slot.clone()}>
                    <strong>{ format!("{}: ", slot.slot) }</strong>
                    { ctx.story.equipment_name(&slot.id).to_string() }
                </li>
            }
        });
        html! {
            <div>
                <h4 style="margin:4px 0;">{ format!("{}'s equipment", found.username) }</h4>
                <ul style="margin:0; font-size:13px;">{ for rows }</ul>
            </div>
        }
    });

    html! {
        <div class="panel player-lookup-panel" style="display:flex; flex-direction:column; gap:6px;">
            <h3 style="margin:0;">{"Inspect a player"}</h3>
            <div style="display:flex; gap:8px;">
                <input type="text" placeholder="Player name" value={(*username).clone()} oninput={on_input} />
                <button onclick={on_view}>{"View"}</button>
            </div>
            { for view }
        </div>
    }
}
