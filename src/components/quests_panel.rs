use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::game_view::GameContext;
use crate::catalog;
use crate::model::{GameAction, QuestDef};
use crate::quests::{format_requirement, ordered_quests, progress};
use crate::state::BannerScope;
use crate::util::format_number;

fn reward_text(quest: &QuestDef) -> String {
    quest
        .reward
        .iter()
        .map(|(key, v)| format!("{} {}", format_number(*v), catalog::currency_label(key)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[function_component]
pub fn QuestsPanel() -> Html {
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };

    let on_complete = {
        let ctx = ctx.clone();
        Callback::from(move |(id, name): (String, String)| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.api.complete_quest(&id).await {
                    Ok(response) => {
                        ctx.dispatch(GameAction::QuestCompleted { id, response });
                        ctx.success(format!("Quest complete: {name}"), BannerScope::Game);
                        ctx.reload();
                    }
                    Err(err) => ctx.fail("complete-quest", &err, BannerScope::Game),
                }
            });
        })
    };

    let state = &*ctx.state;
    let chapter_no = state.story.current_chapter;
    let Some(chapter) = ctx.story.chapter(chapter_no) else {
        return html! {
            <div class="panel quests-panel" style="opacity:0.7;">{"No quests available."}</div>
        };
    };

    let rows = ordered_quests(chapter).into_iter().map(|quest| {
        let done = state.is_quest_completed(&quest.id);
        let p = progress(&quest.requirement, state, &ctx.story);
        let ready = !done && p.percent >= 100.0;
        let onclick = {
            let on_complete = on_complete.clone();
            let payload = (quest.id.clone(), quest.name.clone());
            Callback::from(move |_| on_complete.emit(payload.clone()))
        };
        html! {
            <div class={classes!("card", "quest-card", done.then_some("done"), quest.optional.then_some("optional"))}
                 key={quest.id.clone()}
                 style="display:flex; flex-direction:column; gap:4px; padding:8px 10px;">
                <div style="display:flex; justify-content:space-between; gap:8px;">
                    <span style="font-weight:600;">
                        { quest.name.clone() }
                        if quest.optional { <span class="badge" style="margin-left:6px; font-size:11px;">{"Side"}</span> }
                    </span>
                    if done {
                        <span class="badge built">{"✔ Done"}</span>
                    } else {
                        <button {onclick} disabled={!ready}>{"Complete"}</button>
                    }
                </div>
                <div style="font-size:12px; opacity:0.8;">{ quest.description.clone() }</div>
                <div style="font-size:12px;">{ format_requirement(&quest.requirement, &ctx.story) }</div>
                if !done && !p.text.is_empty() {
                    <div style="font-size:12px;">
                        <div style="height:4px; background:#30363d; border-radius:2px;">
                            <div style={format!("height:4px; border-radius:2px; background:#3fb950; width:{:.0}%;", p.percent)}></div>
                        </div>
                        { p.text.clone() }
                    </div>
                }
                if !quest.reward.is_empty() {
                    <div style="font-size:12px; opacity:0.8;">{ format!("Reward: {}", reward_text(quest)) }</div>
                }
            </div>
        }
    });

    html! {
        <div class="panel quests-panel" style="display:flex; flex-direction:column; gap:8px;">
            <h3 style="margin:0;">{ format!("Chapter {}: {}", chapter_no, chapter.title) }</h3>
            <p style="margin:0; font-size:13px; opacity:0.8;">{ chapter.description.clone() }</p>
            { for rows }
        </div>
    }
}
