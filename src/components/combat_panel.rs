use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::game_view::GameContext;
use crate::model::{CombatStats, GameAction, Monster, MonsterStatus, Rewards};
use crate::state::{Banner, BannerScope};
use crate::util::format_number;

/// Which kind of fight a button starts.
#[derive(Clone, Debug, PartialEq)]
enum Fight {
    Pvp(String),
    Campaign(String),
}

fn stats_line(stats: &CombatStats) -> String {
    format!(
        "ATK {} · DEF {} · LUCK {} · HP {}",
        format_number(stats.attack),
        format_number(stats.defense),
        format_number(stats.luck),
        format_number(stats.hp)
    )
}

fn rewards_line(rewards: &Rewards) -> String {
    let mut parts = Vec::new();
    if rewards.gooncoins > 0.0 {
        parts.push(format!("{} Gooncoins", format_number(rewards.gooncoins)));
    }
    for (key, amount) in &rewards.rare_materials {
        parts.push(format!("{} {}", format_number(*amount), key));
    }
    parts.join(", ")
}

fn monster_badge(status: MonsterStatus) -> &'static str {
    match status {
        MonsterStatus::Next => "Next",
        MonsterStatus::Repeatable => "Farm",
        MonsterStatus::Defeated => "Defeated",
        MonsterStatus::Locked => "Locked",
    }
}

fn monster_row(monster: &Monster, on_fight: &Callback<Fight>) -> Html {
    let status = monster.status();
    let onclick = {
        let on_fight = on_fight.clone();
        let id = monster.id.clone();
        Callback::from(move |_| on_fight.emit(Fight::Campaign(id.clone())))
    };
    html! {
        <div class={classes!("card", "monster-card", (!status.can_fight()).then_some("locked"))} key={monster.id.clone()}
             style="display:flex; gap:10px; align-items:center; padding:6px 10px;">
            <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                <span style="font-weight:600;">{ format!("{} (Tier {})", monster.name, monster.tier) }</span>
                <span style="font-size:12px; opacity:0.8;">{ stats_line(&monster.stats) }</span>
                if !monster.rewards.is_empty() {
                    <span style="font-size:12px; opacity:0.8;">{ format!("Loot: {}", rewards_line(&monster.rewards)) }</span>
                }
            </div>
            <span class="badge">{ monster_badge(status) }</span>
            <button {onclick} disabled={!status.can_fight()}>{"Fight"}</button>
        </div>
    }
}

#[function_component]
pub fn CombatPanel() -> Html {
    let busy = use_state(|| false);
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };

    let on_fight = {
        let ctx = ctx.clone();
        let busy = busy.clone();
        Callback::from(move |fight: Fight| {
            if *busy {
                return;
            }
            busy.set(true);
            let ctx = ctx.clone();
            let busy = busy.clone();
            spawn_local(async move {
                let result = match &fight {
                    Fight::Pvp(opponent) => ctx.api.pvp_battle(opponent).await,
                    Fight::Campaign(monster) => ctx.api.campaign_battle(monster).await,
                };
                match result {
                    Ok(res) => {
                        let text = res.outcome_text();
                        let banner = if res.player_won {
                            Banner::success(text, BannerScope::Combat)
                        } else {
                            Banner::error(text, BannerScope::Combat)
                        };
                        ctx.dispatch(GameAction::BattleResolved(res));
                        ctx.notify.emit(banner);
                        ctx.reload_combat();
                        ctx.reload();
                    }
                    Err(err) => ctx.fail("combat", &err, BannerScope::Combat),
                }
                busy.set(false);
            });
        })
    };

    let Some(overview) = ctx.state.combat_overview.clone() else {
        return html! { <div class="panel combat-panel loading">{"Loading combat…"}</div> };
    };
    let profile = &overview.profile;

    let materials = overview.rare_materials.iter().filter(|(_, v)| **v > 0.0).map(|(key, amount)| {
        let def = overview.rare_material_defs.get(key);
        let icon = def.map(|d| d.icon.clone()).unwrap_or_default();
        let name = def.map(|d| d.name.clone()).filter(|n| !n.is_empty()).unwrap_or_else(|| key.clone());
        let title = def.map(|d| d.description.clone()).unwrap_or_default();
        html! { <span class="material" {title}>{ format!("{icon} {name}: {}", format_number(*amount)) }</span> }
    });

    let opponents = overview.pvp.opponents.iter().map(|op| {
        let onclick = {
            let on_fight = on_fight.clone();
            let name = op.username.clone();
            Callback::from(move |_| on_fight.emit(Fight::Pvp(name.clone())))
        };
        html! {
            <div class="card opponent-card" key={op.username.clone()}
                 style="display:flex; gap:10px; align-items:center; padding:6px 10px;">
                <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                    <span style="font-weight:600;">{ format!("{} ({:.0})", op.username, op.rating) }</span>
                    <span style="font-size:12px; opacity:0.8;">
                        { format!("{}W / {}L · Power {}", op.wins, op.losses, format_number(op.stats.power_score)) }
                    </span>
                </div>
                <button {onclick} disabled={*busy}>{"Fight"}</button>
            </div>
        }
    });

    let monsters = overview
        .campaign
        .monsters
        .iter()
        .filter(|m| m.status() != MonsterStatus::Locked)
        .map(|m| monster_row(m, &on_fight));

    let logs = overview.pvp.recent_logs.iter().take(10).map(|log| {
        let attacker = log.attacker.username.clone().unwrap_or_else(|| "?".to_string());
        let defender = log.defender.username.clone().unwrap_or_else(|| "?".to_string());
        let winner = log.winner_name().unwrap_or("nobody");
        html! {
            <li style="font-size:12px;">
                { format!("{attacker} vs {defender}: {winner} won") }
                if let Some(at) = &log.created_at {
                    <span style="opacity:0.6;">{ format!(" · {at}") }</span>
                }
            </li>
        }
    });

    html! {
        <div class="panel combat-panel" style="display:flex; flex-direction:column; gap:8px;">
            <h3 style="margin:0;">{"Combat"}</h3>
            <div style="font-size:13px;">
                <div>{ stats_line(&overview.player_stats) }</div>
                <div>
                    { format!(
                        "Rating {:.0} · {}W / {}L · Campaign stage {} · Power {}",
                        profile.rating,
                        profile.wins,
                        profile.losses,
                        profile.campaign_stage,
                        format_number(overview.player_stats.power_score)
                    ) }
                </div>
            </div>
            <div class="materials" style="display:flex; gap:10px; flex-wrap:wrap; font-size:13px;">{ for materials }</div>

            <h4 style="margin:4px 0 0;">{"Arena"}</h4>
            if overview.pvp.opponents.is_empty() {
                <div style="opacity:0.7;">{"No opponents right now."}</div>
            }
            { for opponents }

            <h4 style="margin:4px 0 0;">{ format!("Campaign · stage {}", overview.campaign.stage) }</h4>
            { for monsters }

            if !overview.pvp.recent_logs.is_empty() {
                <h4 style="margin:4px 0 0;">{"Recent fights"}</h4>
                <ul style="margin:0; padding-left:18px;">{ for logs }</ul>
            }
        </div>
    }
}
