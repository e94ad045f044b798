use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::game_view::GameContext;
use super::upgrades_panel::cost_list_by;
use crate::model::{Blessing, GameAction, Resources, TempleRoom, TempleSnapshot};
use crate::state::{Banner, BannerScope, Cooldown, CooldownAction, Interval};
use crate::util::{format_cooldown, format_number};

fn room_card(room: &TempleRoom, ready: bool, on_fight: &Callback<String>) -> Html {
    let onclick = {
        let on_fight = on_fight.clone();
        let id = room.id.clone();
        Callback::from(move |_| on_fight.emit(id.clone()))
    };
    let label = if room.boss_ready { "Fight boss" } else { "Fight" };
    let progress = if room.boss_ready {
        format!("Boss ready: {}", room.boss_name)
    } else {
        format!("{} / {} kills", room.kills, room.required_kills)
    };
    html! {
        <div class={classes!("card", "room-card", (!room.unlocked).then_some("locked"))} key={room.id.clone()}
             style="display:flex; gap:10px; align-items:center; padding:6px 10px;">
            <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                <span style="font-weight:600;">{ room.name.clone() }</span>
                <span style="font-size:12px; opacity:0.8;">{ room.description.clone() }</span>
                <span style="font-size:12px;">{ progress }</span>
                if !room.enemy_preview.is_empty() {
                    <span style="font-size:12px; opacity:0.7;">{ format!("Enemies: {}", room.enemy_preview.join(", ")) }</span>
                }
            </div>
            if room.unlocked {
                <button {onclick} disabled={!ready}>{ label }</button>
            } else {
                <span class="badge locked">{"🔒"}</span>
            }
        </div>
    }
}

fn blessing_card(
    blessing: &Blessing,
    temple: &TempleSnapshot,
    wallet: &Resources,
    cooldown_ready: bool,
    on_ritual: &Callback<String>,
) -> Html {
    let onclick = {
        let on_ritual = on_ritual.clone();
        let id = blessing.id.clone();
        Callback::from(move |_| on_ritual.emit(id.clone()))
    };
    let active = temple.is_active(blessing);
    let enabled = temple.ritual_available(blessing, wallet, cooldown_ready);
    let label = if active { "Active" } else { "Perform ritual" };
    html! {
        <div class={classes!("card", "blessing-card", active.then_some("active"))} key={blessing.id.clone()}
             style="display:flex; gap:10px; align-items:center; padding:6px 10px;">
            <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                <span style="font-weight:600;">{ blessing.name.clone() }</span>
                <span style="font-size:12px; opacity:0.8;">{ blessing.description.clone() }</span>
                <span style="font-size:12px;">
                    { format!("{} for {}", blessing.bonus_text(), format_cooldown(blessing.duration.max(0.0) as u64)) }
                </span>
                { cost_list_by(&blessing.cost, |key, amount| temple.covers(key, amount, wallet)) }
            </div>
            <button {onclick} disabled={!enabled}>{ label }</button>
        </div>
    }
}

#[function_component]
pub fn TemplePanel() -> Html {
    let cooldown = use_reducer(Cooldown::default);
    let ctx = use_context::<GameContext>();
    let server_cooldown = ctx
        .as_ref()
        .and_then(|c| c.state.temple.as_ref())
        .map(|t| t.cooldown_seconds);

    // Each snapshot restarts the countdown; between snapshots it ticks locally.
    {
        let dispatcher = cooldown.dispatcher();
        use_effect_with(server_cooldown, move |secs| {
            dispatcher.dispatch(CooldownAction::Reset(secs.unwrap_or(0)));
            let ticker = Interval::start(1000, move || dispatcher.dispatch(CooldownAction::Tick));
            move || drop(ticker)
        });
    }

    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_fight = {
        let ctx = ctx.clone();
        Callback::from(move |room: String| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.api.temple_fight(&room).await {
                    Ok(res) => {
                        let text = res.outcome_text();
                        let banner = if res.player_won {
                            Banner::success(text, BannerScope::Combat)
                        } else {
                            Banner::error(text, BannerScope::Combat)
                        };
                        ctx.dispatch(GameAction::BattleResolved(res));
                        ctx.notify.emit(banner);
                        ctx.reload_temple();
                    }
                    Err(err) => ctx.fail("temple/fight", &err, BannerScope::Combat),
                }
            });
        })
    };

    let on_ritual = {
        let ctx = ctx.clone();
        Callback::from(move |blessing: String| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.api.temple_ritual(&blessing).await {
                    Ok(res) => {
                        ctx.dispatch(GameAction::RitualPerformed(res));
                        ctx.success("The ritual is complete.", BannerScope::Combat);
                        ctx.reload_temple();
                    }
                    Err(err) => ctx.fail("temple/ritual", &err, BannerScope::Combat),
                }
            });
        })
    };

    let Some(temple) = ctx.state.temple.clone() else {
        return html! { <div class="panel temple-panel loading">{"Loading temple…"}</div> };
    };

    if !temple.unlocked {
        let reason = temple.reason.clone().unwrap_or_else(|| "The temple is sealed.".to_string());
        return html! {
            <div class="panel temple-panel locked" style="display:flex; flex-direction:column; gap:6px;">
                <h3 style="margin:0;">{"Temple"}</h3>
                <div style="opacity:0.7;">{ format!("🔒 {reason}") }</div>
            </div>
        };
    }

    let ready = cooldown.is_ready();
    let rooms = temple.rooms.iter().map(|room| room_card(room, ready, &on_fight));
    let blessings = temple
        .blessings
        .iter()
        .map(|b| blessing_card(b, &temple, &ctx.state.resources, ready, &on_ritual));

    html! {
        <div class="panel temple-panel" style="display:flex; flex-direction:column; gap:8px;">
            <h3 style="margin:0;">{"Temple"}</h3>
            <div style="display:flex; gap:14px; font-size:13px;">
                <span>{ format!("🔱 Favor {}", format_number(temple.favor)) }</span>
                <span>{ format!("Cooldown {}", cooldown.label()) }</span>
            </div>
            if let Some(active) = &temple.active_blessing {
                <div class="active-blessing" style="font-size:13px;">
                    { format!("Active blessing: {} ({} left)", active.name, format_cooldown(active.expires_in)) }
                </div>
            }
            <h4 style="margin:4px 0 0;">{"Rooms"}</h4>
            { for rooms }
            if !temple.blessings.is_empty() {
                <h4 style="margin:4px 0 0;">{"Blessings"}</h4>
                { for blessings }
            }
        </div>
    }
}
