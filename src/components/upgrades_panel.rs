use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::game_view::GameContext;
use crate::catalog::{self, CLICK_UPGRADES};
use crate::model::{CostMap, GameAction, Resources};
use crate::state::BannerScope;
use crate::util::format_cost_value;

/// Inline cost list, each entry marked when the wallet cannot cover it.
pub fn cost_list(cost: &CostMap, wallet: &Resources) -> Html {
    cost_list_by(cost, |key, amount| wallet.can_afford(&CostMap::from([(key.to_string(), amount)])))
}

/// Same list with a caller-supplied check, for costs paid partly outside the wallet.
pub fn cost_list_by(cost: &CostMap, covers: impl Fn(&str, f64) -> bool) -> Html {
    let parts = cost.iter().filter(|(_, v)| **v > 0.0).map(|(key, amount)| {
        let short = !covers(key, *amount);
        let class = if short { "cost cost-short" } else { "cost" };
        html! {
            <span {class} title={catalog::currency_label(key)}>
                { format!("{} {}", catalog::currency_icon(key), format_cost_value(*amount)) }
            </span>
        }
    });
    html! { <span class="cost-list" style="display:inline-flex; gap:8px; flex-wrap:wrap;">{ for parts }</span> }
}

#[derive(Properties, PartialEq, Clone)]
pub struct UpgradeCardProps {
    pub upgrade_key: &'static str,
    /// Extra line under the description (e.g. production rate).
    #[prop_or_default]
    pub detail: Option<String>,
}

#[function_component]
pub fn UpgradeCard(props: &UpgradeCardProps) -> Html {
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };
    let Some(info) = catalog::upgrade(props.upgrade_key) else {
        return html! {};
    };
    let state = &*ctx.state;
    let level = state.level(info.key);
    let cost = state.upgrade_cost(info.key).unwrap_or_default();
    let affordable = state.resources.can_afford(&cost);

    let onclick = {
        let ctx = ctx.clone();
        let key = info.key.to_string();
        let cost = cost.clone();
        Callback::from(move |_| {
            let ctx = ctx.clone();
            let key = key.clone();
            ctx.dispatch(GameAction::OptimisticSpend(cost.clone()));
            spawn_local(async move {
                match ctx.api.buy_upgrade(&key).await {
                    Ok(response) => {
                        ctx.dispatch(GameAction::UpgradeBought { key, response });
                        ctx.reload();
                    }
                    Err(err) => {
                        ctx.fail("buy-upgrade", &err, BannerScope::Game);
                        ctx.reload();
                    }
                }
            });
        })
    };

    html! {
        <div class="card upgrade-card" style="display:flex; gap:10px; align-items:center; padding:8px 10px;">
            <span style="font-size:22px; width:28px; text-align:center;">{ info.icon }</span>
            <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                <div style="font-weight:600;">{ format!("{} (Lv. {})", info.name, level) }</div>
                <div style="font-size:12px; opacity:0.8;">{ info.description }</div>
                if let Some(detail) = &props.detail {
                    <div style="font-size:12px; opacity:0.8;">{ detail.clone() }</div>
                }
                { cost_list(&cost, &state.resources) }
            </div>
            <button {onclick} disabled={!affordable}>{"Buy"}</button>
        </div>
    }
}

#[function_component]
pub fn UpgradesPanel() -> Html {
    let cards = CLICK_UPGRADES.iter().map(|key| html! { <UpgradeCard upgrade_key={*key} key={*key} /> });
    html! {
        <div class="panel upgrades-panel" style="display:flex; flex-direction:column; gap:8px;">
            <h3 style="margin:0;">{"Upgrades"}</h3>
            { for cards }
        </div>
    }
}
