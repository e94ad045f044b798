use yew::prelude::*;

use super::game_view::GameContext;
use crate::model::ResourceKind;
use crate::util::{format_number, format_rate};

#[function_component]
pub fn ResourceBar() -> Html {
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };
    let state = &*ctx.state;
    let rates = state.rates();

    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value | rate
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style = "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let rate_style = "min-width:60px; text-align:right; font-size:12px; opacity:0.7;";

    let rows = ResourceKind::ALL
        .into_iter()
        .filter(|k| state.is_currency_unlocked(*k) || state.resources.get(*k) > 0.0)
        .map(|kind| {
            let rate = rates.get(&kind).copied().unwrap_or(0.0);
            let rate_text = if rate > 0.0 { format_rate(rate) } else { String::new() };
            html! {
                <div style={row_style} class="resource-row" key={kind.key()}>
                    <span style={icon_style}>{ kind.icon() }</span>
                    <span style={label_style}>{ kind.label() }</span>
                    <span style={value_style}>{ format_number(state.resources.get(kind)) }</span>
                    <span style={rate_style}>{ rate_text }</span>
                </div>
            }
        });

    html! {
        <div class="panel resource-bar" style="display:flex; flex-direction:column; gap:10px; font-size:14px;">
            { for rows }
            <div style={row_style} class="resource-row">
                <span style={icon_style}>{"👆"}</span>
                <span style={label_style}>{"Clicks"}</span>
                <span style={value_style}>{ state.total_clicks }</span>
                <span style={rate_style}></span>
            </div>
        </div>
    }
}
