use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::game_view::GameContext;
use super::upgrades_panel::cost_list;
use crate::crafting::{CraftItem, CraftSort, can_afford_craft, craft_list};
use crate::model::GameAction;
use crate::state::BannerScope;
use crate::storage::{CRAFT_SORT_KEY, read_preference, write_preference};
use crate::util::format_number;

fn craft_card(ctx: &GameContext, item: &CraftItem, on_craft: Callback<String>) -> Html {
    let state = &*ctx.state;
    let owned = state.equipment_counts.get(&item.id).copied().unwrap_or(0);
    let affordable = can_afford_craft(&state.resources, &item.def.cost);
    let unlocked = item.unlock.is_unlocked;
    let onclick = {
        let id = item.id.clone();
        Callback::from(move |_| on_craft.emit(id.clone()))
    };
    let bonus = item
        .def
        .bonus
        .iter()
        .map(|(stat, v)| format!("+{} {}", format_number(*v), stat))
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <div class={classes!("card", "craft-card", item.rarity.css_class(), (!unlocked).then_some("locked"))}
             key={item.id.clone()}
             style="display:flex; flex-direction:column; gap:4px; padding:8px 10px;">
            <div style="display:flex; justify-content:space-between; gap:8px;">
                <span style="font-weight:600;">{ item.def.name.clone() }</span>
                <span style="font-size:12px; opacity:0.8;">{ format!("{} · {}", item.rarity.label(), item.def.slot) }</span>
            </div>
            <div style="font-size:12px; opacity:0.8;">
                { format!("Power {} · Owned {}", format_number(item.power), owned) }
                if !bonus.is_empty() { { format!(" · {bonus}") } }
            </div>
            if !unlocked {
                <div class="unlock-progress" style="font-size:12px;">
                    <div style="height:4px; background:#30363d; border-radius:2px;">
                        <div style={format!("height:4px; border-radius:2px; background:#d4af37; width:{:.0}%;", item.unlock.progress * 100.0)}></div>
                    </div>
                    { for item.unlock.requirements.iter().map(|r| html! {
                        <div class={if r.met { "req met" } else { "req" }}>
                            { format!("{} / {} × {}", r.owned, r.needed, r.name) }
                        </div>
                    }) }
                </div>
            }
            <div style="display:flex; justify-content:space-between; align-items:center;">
                { cost_list(&item.def.cost, &state.resources) }
                <button {onclick} disabled={!(unlocked && affordable)}>{"Craft"}</button>
            </div>
        </div>
    }
}

#[function_component]
pub fn CraftingPanel() -> Html {
    let sort = use_state(|| {
        read_preference(CRAFT_SORT_KEY)
            .map(|v| CraftSort::from_key(&v))
            .unwrap_or_default()
    });
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };

    let on_sort = {
        let sort = sort.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
                let mode = CraftSort::from_key(&select.value());
                write_preference(CRAFT_SORT_KEY, mode.key());
                sort.set(mode);
            }
        })
    };

    let on_craft = {
        let ctx = ctx.clone();
        Callback::from(move |id: String| {
            let ctx = ctx.clone();
            if let Some(def) = ctx.story.equipment.get(&id) {
                ctx.dispatch(GameAction::OptimisticSpend(def.cost.clone()));
            }
            spawn_local(async move {
                match ctx.api.craft_equipment(&id).await {
                    Ok(res) => {
                        ctx.dispatch(GameAction::Crafted(res));
                        let name = ctx.story.equipment_name(&id).to_string();
                        ctx.success(format!("Crafted {name}!"), BannerScope::Game);
                    }
                    Err(err) => {
                        ctx.fail("craft-equipment", &err, BannerScope::Game);
                        ctx.reload();
                    }
                }
            });
        })
    };

    let items = craft_list(&ctx.story, &ctx.state.equipment_counts, *sort);
    let options = CraftSort::ALL.iter().map(|mode| {
        html! { <option value={mode.key()} selected={*mode == *sort}>{ mode.label() }</option> }
    });

    html! {
        <div class="panel crafting-panel" style="display:flex; flex-direction:column; gap:8px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0;">{"Crafting"}</h3>
                <label style="font-size:13px; display:flex; gap:6px; align-items:center;">
                    {"Sort"}
                    <select onchange={on_sort}>{ for options }</select>
                </label>
            </div>
            if items.is_empty() {
                <div style="opacity:0.7;">{"No recipes known yet."}</div>
            }
            { for items.iter().map(|item| craft_card(&ctx, item, on_craft.clone())) }
        </div>
    }
}
