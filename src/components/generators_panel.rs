use yew::prelude::*;

use super::game_view::GameContext;
use super::upgrades_panel::UpgradeCard;
use crate::catalog::GENERATORS;
use crate::util::format_rate;

#[function_component]
pub fn GeneratorsPanel() -> Html {
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };
    let state = &*ctx.state;
    let rates = state.rates();

    let cards = GENERATORS.iter().map(|g| {
        if !state.is_currency_unlocked(g.produces) {
            return html! {
                <div class="card locked" key={g.upgrade_key} style="padding:8px 10px; opacity:0.5;">
                    { format!("🔒 Unlock {} to build this generator", g.produces.label()) }
                </div>
            };
        }
        let current = rates.get(&g.produces).copied().unwrap_or(0.0);
        let detail = format!(
            "{} {} now, {} per level",
            format_rate(current),
            g.produces.label(),
            format_rate(g.rate_per_level)
        );
        html! { <UpgradeCard upgrade_key={g.upgrade_key} key={g.upgrade_key} detail={Some(detail)} /> }
    });

    html! {
        <div class="panel generators-panel" style="display:flex; flex-direction:column; gap:8px;">
            <h3 style="margin:0;">{"Auto-generators"}</h3>
            { for cards }
        </div>
    }
}
