use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::game_view::GameContext;
use crate::catalog;
use crate::crafting::Rarity;
use crate::model::{CaseDef, CaseHistoryEntry, CaseReward, CostMap, GameAction};
use crate::state::BannerScope;
use crate::util::{cerror, format_cost_value, format_number};

const HISTORY_SHOWN: usize = 8;

fn case_card(case: &CaseDef, affordable: bool, on_open: &Callback<CaseDef>) -> Html {
    let onclick = {
        let on_open = on_open.clone();
        let case = case.clone();
        Callback::from(move |_| on_open.emit(case.clone()))
    };
    let odds = case.odds().into_iter().map(|(item, pct)| {
        let rarity = Rarity::parse(Some(item.rarity.as_str()));
        html! {
            <li class={rarity.css_class()} style="font-size:12px;">
                { format!("{} {} · {:.1}%", item.icon.clone().unwrap_or_default(), item.name, pct) }
            </li>
        }
    });
    html! {
        <div class="card case-card" key={case.id.clone()}
             style="display:flex; flex-direction:column; gap:4px; padding:8px 10px;">
            <div style="display:flex; justify-content:space-between; align-items:center; gap:8px;">
                <span style="font-weight:600;">
                    { format!("{} {}", case.icon.clone().unwrap_or_else(|| "🎁".to_string()), case.name) }
                </span>
                <button {onclick} disabled={!affordable}>
                    { format!("Open · {} {}", catalog::currency_icon(&case.currency), format_cost_value(case.price)) }
                </button>
            </div>
            if let Some(tagline) = &case.tagline {
                <div style="font-size:12px; font-style:italic; opacity:0.8;">{ tagline.clone() }</div>
            }
            if let Some(description) = &case.description {
                <div style="font-size:12px; opacity:0.8;">{ description.clone() }</div>
            }
            <ul style="margin:0; padding-left:18px;">{ for odds }</ul>
        </div>
    }
}

fn history_row(entry: &CaseHistoryEntry) -> Html {
    let rarity = Rarity::parse(Some(entry.rarity.as_str()));
    let amount = if entry.amount > 1.0 { format!("{}× ", format_number(entry.amount)) } else { String::new() };
    html! {
        <li class={rarity.css_class()} style="font-size:12px;">
            { format!("{}: {amount}{}", entry.case_name, entry.reward_label) }
        </li>
    }
}

#[function_component]
pub fn CasesPanel() -> Html {
    let cases = use_state(Vec::<CaseDef>::new);
    let history = use_state(Vec::<CaseHistoryEntry>::new);
    let last_reward = use_state(|| None::<CaseReward>);
    let ctx = use_context::<GameContext>();

    {
        let api = ctx.as_ref().map(|c| c.api.clone());
        let cases = cases.setter();
        let history = history.setter();
        use_effect_with((), move |_| {
            if let Some(api) = api {
                spawn_local(async move {
                    match api.cases().await {
                        Ok(res) => {
                            cases.set(res.cases);
                            history.set(res.history);
                        }
                        Err(err) => cerror(&format!("cases: {err}")),
                    }
                });
            }
            || ()
        });
    }

    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_open = {
        let ctx = ctx.clone();
        let history = history.setter();
        let last_reward = last_reward.setter();
        Callback::from(move |case: CaseDef| {
            let ctx = ctx.clone();
            let history = history.clone();
            let last_reward = last_reward.clone();
            ctx.dispatch(GameAction::OptimisticSpend(CostMap::from([(case.currency.clone(), case.price)])));
            spawn_local(async move {
                match ctx.api.open_case(&case.id).await {
                    Ok(mut res) => {
                        let reward = res.reward.take();
                        let text = match &reward {
                            Some(r) => format!("{} dropped {}!", case.name, r.name),
                            None => format!("{} opened.", case.name),
                        };
                        history.set(std::mem::take(&mut res.history));
                        last_reward.set(reward);
                        ctx.dispatch(GameAction::CaseOpened(res));
                        ctx.success(text, BannerScope::Market);
                    }
                    Err(err) => {
                        ctx.fail("cases/open", &err, BannerScope::Market);
                        ctx.reload();
                    }
                }
            });
        })
    };

    let wallet = &ctx.state.resources;
    let cards = cases.iter().map(|case| {
        let price = CostMap::from([(case.currency.clone(), case.price)]);
        case_card(case, wallet.can_afford(&price), &on_open)
    });

    html! {
        <div class="panel cases-panel" style="display:flex; flex-direction:column; gap:8px;">
            <h3 style="margin:0;">{"Cases"}</h3>
            if cases.is_empty() {
                <div style="opacity:0.7;">{"No cases on offer."}</div>
            }
            { for cards }
            if let Some(reward) = &*last_reward {
                <div class={classes!("last-reward", Rarity::parse(Some(reward.rarity.as_str())).css_class())} style="font-size:13px;">
                    { format!("Last drop: {} {} ({})", reward.icon.clone().unwrap_or_default(), reward.name, reward.kind) }
                </div>
            }
            if !history.is_empty() {
                <h4 style="margin:4px 0 0;">{"Recent openings"}</h4>
                <ul style="margin:0; padding-left:18px;">
                    { for history.iter().take(HISTORY_SHOWN).map(history_row) }
                </ul>
            }
        </div>
    }
}
