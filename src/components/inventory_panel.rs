use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::game_view::GameContext;
use crate::crafting::Rarity;
use crate::model::{GameAction, Inventory, InventoryItem, StoryData, Trend};
use crate::state::BannerScope;
use crate::util::{format_item_value, format_number};

const TRENDING_LIMIT: usize = 4;

fn item_card(item: &InventoryItem, selling: Option<i64>, on_sell: &Callback<i64>) -> Html {
    let rarity = Rarity::parse(Some(item.rarity.as_str()));
    let trend = item.trend();
    let onclick = {
        let on_sell = on_sell.clone();
        let id = item.instance_id;
        Callback::from(move |_| on_sell.emit(id))
    };
    let origin = item.acquisition_note.clone().unwrap_or_else(|| "Acquired".to_string());
    let when = item.acquired_at.clone().unwrap_or_else(|| "unknown".to_string());
    let busy = selling.is_some();
    let sell_label = if selling == Some(item.instance_id) {
        "Selling…".to_string()
    } else {
        format!("Sell for {} 💰", format_item_value(item.sell_price()))
    };
    html! {
        <div class={classes!("card", "inventory-item", item.equipped.then_some("equipped"))} key={item.instance_id.to_string()}
             style="display:flex; gap:10px; align-items:center; padding:6px 10px;">
            <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                <span style="font-weight:600;">{ item.name.clone() }</span>
                <span style="font-size:12px;">
                    <span class={rarity.css_class()}>{ rarity.label() }</span>
                    { format!(" · {}", item.slot) }
                    if item.equipped { {" · Equipped"} }
                </span>
                <span style="font-size:12px; opacity:0.7;">{ format!("{origin} · {when}") }</span>
            </div>
            <div style="display:flex; flex-direction:column; align-items:flex-end; font-size:12px;">
                <strong>{ format!("{} 💰", format_item_value(item.value())) }</strong>
                <span class={trend.css_class()}>{ trend.arrow() }</span>
            </div>
            <button class="danger" {onclick} disabled={busy}>{ sell_label }</button>
        </div>
    }
}

fn summary_row(inventory: &Inventory) -> Html {
    let summary = &inventory.summary;
    let rarities = summary.rarity_breakdown.iter().map(|(rarity, count)| {
        let r = Rarity::parse(Some(rarity.as_str()));
        html! { <span class={r.css_class()}>{ format!("{}: {count}", r.label()) }</span> }
    });
    html! {
        <div class="inventory-summary" style="display:flex; gap:14px; flex-wrap:wrap; font-size:13px;">
            <span>{ format!("Items {}", summary.total_items) }</span>
            <span>{ format!("Equipped {}", summary.equipped_items) }</span>
            <span>{ format!("Duplicates {}", summary.duplicates) }</span>
            <span>{ format!("Worth ~{} 💰", format_item_value(summary.estimated_sell_value)) }</span>
            { for rarities }
        </div>
    }
}

fn trending_list(inventory: &Inventory, story: &StoryData) -> Html {
    let rows = inventory.trending(TRENDING_LIMIT).into_iter().map(|(id, info)| {
        let trend = Trend::from_wire(&info.trend);
        let value = if info.market_value > 0.0 { info.market_value } else { info.base_value };
        html! {
            <li key={id.to_string()} style="display:flex; justify-content:space-between; gap:8px;">
                <span>
                    { story.equipment_name(id).to_string() }
                    <small style="opacity:0.7;">{ format!(" · supply {}", info.current_supply.unwrap_or(0)) }</small>
                </span>
                <span class={trend.css_class()}>
                    { format!("{} 💰 {} ×{:.2}", format_item_value(value), trend.arrow(), info.price_multiplier) }
                </span>
            </li>
        }
    });
    html! {
        <div class="inventory-market">
            <h4 style="margin:4px 0;">{"Hottest items"}</h4>
            if inventory.market.is_empty() {
                <div style="opacity:0.7;">{"The item market has not moved yet."}</div>
            } else {
                <ul style="list-style:none; margin:0; padding:0; font-size:13px;">{ for rows }</ul>
                <div style="font-size:12px; opacity:0.7;">
                    { format!("Updated {}", inventory.updated_at.clone().unwrap_or_default()) }
                </div>
            }
        </div>
    }
}

/// Items worn right now, slot by slot.
#[function_component]
pub fn EquippedPanel() -> Html {
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };
    let rows = ctx.state.equipment.iter().map(|(slot, id)| {
        let power = ctx
            .story
            .equipment
            .get(id)
            .map(crate::crafting::item_power)
            .unwrap_or(0.0);
        html! {
            <div key={slot.clone()} style="display:flex; justify-content:space-between; font-size:13px;">
                <span style="opacity:0.8;">{ slot.clone() }</span>
                <span>{ format!("{} (power {})", ctx.story.equipment_name(id), format_number(power)) }</span>
            </div>
        }
    });
    html! {
        <div class="panel equipped-panel" style="display:flex; flex-direction:column; gap:4px;">
            <h3 style="margin:0;">{"Equipped"}</h3>
            if ctx.state.equipment.is_empty() {
                <div style="opacity:0.7;">{"Nothing equipped yet."}</div>
            } else {
                { for rows }
            }
        </div>
    }
}

#[function_component]
pub fn InventoryPanel() -> Html {
    let rarity = use_state(|| None::<String>);
    let search = use_state(String::new);
    // One sale in flight at a time.
    let selling = use_state(|| None::<i64>);
    let ctx = use_context::<GameContext>();

    // Fresh listing each time the panel opens.
    {
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            if let Some(ctx) = ctx {
                spawn_local(async move {
                    match ctx.api.inventory().await {
                        Ok(inventory) => ctx.dispatch(GameAction::InventoryRefreshed(inventory)),
                        Err(err) => ctx.fail("inventory", &err, BannerScope::Game),
                    }
                });
            }
            || ()
        });
    }

    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_refresh = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.api.inventory().await {
                    Ok(inventory) => {
                        ctx.dispatch(GameAction::InventoryRefreshed(inventory));
                        ctx.success("Inventory updated.", BannerScope::Game);
                    }
                    Err(err) => ctx.fail("inventory", &err, BannerScope::Game),
                }
            });
        })
    };

    let on_sell = {
        let ctx = ctx.clone();
        let selling = selling.clone();
        Callback::from(move |instance_id: i64| {
            if selling.is_some() {
                return;
            }
            selling.set(Some(instance_id));
            let ctx = ctx.clone();
            let selling = selling.clone();
            spawn_local(async move {
                match ctx.api.sell_item(instance_id).await {
                    Ok(res) => {
                        let text = res.message.clone().unwrap_or_else(|| "Item sold.".to_string());
                        ctx.dispatch(GameAction::ItemSold(res));
                        ctx.success(text, BannerScope::Game);
                    }
                    Err(err) => ctx.fail("inventory/sell", &err, BannerScope::Game),
                }
                selling.set(None);
            });
        })
    };

    let on_rarity = {
        let rarity = rarity.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
                let value = select.value();
                rarity.set((value != "all").then_some(value));
            }
        })
    };
    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                search.set(input.value());
            }
        })
    };

    let Some(inventory) = ctx.state.inventory.clone() else {
        return html! { <div class="panel inventory-panel loading">{"Loading inventory…"}</div> };
    };

    let items = inventory.filtered(rarity.as_deref(), &search);
    let cards = items
        .iter()
        .map(|item| item_card(item, *selling, &on_sell));
    let rarity_options = ["all", "common", "rare", "epic", "legendary", "unique"].into_iter().map(|key| {
        let selected = rarity.as_deref().unwrap_or("all") == key;
        let label = if key == "all" { "All rarities" } else { Rarity::parse(Some(key)).label() };
        html! { <option value={key} {selected}>{ label }</option> }
    });

    html! {
        <div class="panel inventory-panel" style="display:flex; flex-direction:column; gap:8px;">
            <div style="display:flex; align-items:center; gap:8px;">
                <h3 style="margin:0; flex:1;">{"Inventory"}</h3>
                <button onclick={on_refresh}>{"Refresh"}</button>
            </div>
            { summary_row(&inventory) }
            <div style="display:flex; gap:8px;">
                <select onchange={on_rarity}>{ for rarity_options }</select>
                <input type="search" placeholder="Search items" value={(*search).clone()} oninput={on_search} />
            </div>
            if items.is_empty() {
                <div style="opacity:0.7;">{"Your inventory is empty. Craft something in the workshop!"}</div>
            } else {
                { for cards }
            }
            { trending_list(&inventory, &ctx.story) }
        </div>
    }
}
