use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::game_view::GameContext;
use crate::api::{TradeAction, validate_trade_amount};
use crate::model::{GameAction, ResourceKind};
use crate::state::{Banner, BannerScope};
use crate::util::{format_number, format_percent};

fn select_value(e: &Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        .map(|s| s.value())
}

#[function_component]
pub fn MarketPanel() -> Html {
    let currency = use_state(|| None::<ResourceKind>);
    let action = use_state(|| TradeAction::Buy);
    let amount = use_state(|| "1".to_string());
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };
    let state = &*ctx.state;

    let tradeable: Vec<ResourceKind> = ResourceKind::ALL
        .into_iter()
        .filter(|k| *k != ResourceKind::Gooncoins && state.is_currency_unlocked(*k))
        .collect();

    // Selection falls back to the first tradeable kind until the player picks one.
    let selected = (*currency)
        .filter(|k| tradeable.contains(k))
        .or_else(|| tradeable.first().copied());

    let on_currency = {
        let currency = currency.clone();
        Callback::from(move |e: Event| {
            if let Some(kind) = select_value(&e).and_then(|v| ResourceKind::from_key(&v)) {
                currency.set(Some(kind));
            }
        })
    };
    let on_action = {
        let action = action.clone();
        Callback::from(move |e: Event| {
            let next = match select_value(&e).as_deref() {
                Some("sell") => TradeAction::Sell,
                _ => TradeAction::Buy,
            };
            action.set(next);
        })
    };
    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                amount.set(input.value());
            }
        })
    };

    let on_refresh = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.api.market_rates().await {
                    Ok(economy) => ctx.dispatch(GameAction::EconomyRefreshed(economy)),
                    Err(err) => ctx.fail("currency-market", &err, BannerScope::Market),
                }
            });
        })
    };

    let on_trade = {
        let ctx = ctx.clone();
        let action = *action;
        let amount = (*amount).clone();
        Callback::from(move |_| {
            let Some(kind) = selected else {
                return;
            };
            let value = match amount.trim().parse::<f64>() {
                Ok(v) => validate_trade_amount(v),
                Err(_) => Err("Enter a positive amount.".to_string()),
            };
            let value = match value {
                Ok(v) => v,
                Err(msg) => {
                    ctx.notify.emit(Banner::error(msg, BannerScope::Market));
                    return;
                }
            };
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.api.market_trade(kind.key(), action, value).await {
                    Ok(res) => {
                        let text = res.message.clone().unwrap_or_else(|| "Trade complete.".to_string());
                        ctx.dispatch(GameAction::Traded(res));
                        ctx.success(text, BannerScope::Market);
                    }
                    Err(err) => ctx.fail("currency-market trade", &err, BannerScope::Market),
                }
            });
        })
    };

    let economy = state.economy.clone().unwrap_or_default();
    let trend = state.inflation_trend;

    let rate_rows = tradeable.iter().map(|kind| {
        let rate = economy.market_rates.get(kind.key()).copied().unwrap_or_default();
        html! {
            <tr key={kind.key()}>
                <td>{ format!("{} {}", kind.icon(), kind.label()) }</td>
                <td>{ format_number(rate.buy) }</td>
                <td>{ format_number(rate.sell) }</td>
                <td>{ format_number(state.resources.get(*kind)) }</td>
            </tr>
        }
    });

    let currency_options = tradeable.iter().map(|kind| {
        html! {
            <option value={kind.key()} selected={Some(*kind) == selected}>{ kind.label() }</option>
        }
    });

    html! {
        <div class="panel market-panel" style="display:flex; flex-direction:column; gap:8px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0;">{"Currency market"}</h3>
                <button onclick={on_refresh}>{"Refresh"}</button>
            </div>
            <div class="economy" style="display:flex; gap:14px; font-size:13px; flex-wrap:wrap;">
                <span>
                    {"Inflation "}
                    <span class={trend.css_class()}>{ format!("{} {}", trend.arrow(), format_percent(economy.inflation_rate)) }</span>
                </span>
                <span>{ format!("Supply {}", format_number(economy.gooncoin_supply)) }</span>
                <span>{ format!("Price multiplier ×{:.2}", economy.inflation_multiplier) }</span>
                <span>{ format!("Market ×{:.2}", economy.market_multiplier) }</span>
            </div>
            if tradeable.is_empty() {
                <div style="opacity:0.7;">{"No other currencies unlocked yet."}</div>
            } else {
                <table class="rates" style="width:100%; font-size:13px;">
                    <thead>
                        <tr><th>{"Currency"}</th><th>{"Buy"}</th><th>{"Sell"}</th><th>{"Owned"}</th></tr>
                    </thead>
                    <tbody>{ for rate_rows }</tbody>
                </table>
                <div class="trade-form" style="display:flex; gap:6px; align-items:center;">
                    <select onchange={on_action}>
                        <option value="buy" selected={*action == TradeAction::Buy}>{"Buy"}</option>
                        <option value="sell" selected={*action == TradeAction::Sell}>{"Sell"}</option>
                    </select>
                    <input type="number" min="0" step="any" value={(*amount).clone()} oninput={on_amount} style="width:90px;" />
                    <select onchange={on_currency}>{ for currency_options }</select>
                    <button onclick={on_trade}>{"Trade"}</button>
                </div>
            }
        </div>
    }
}
