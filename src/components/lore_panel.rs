use yew::prelude::*;

use super::game_view::GameContext;

#[function_component]
pub fn LorePanel() -> Html {
    let selected = use_state(|| None::<String>);
    let Some(ctx) = use_context::<GameContext>() else {
        return html! {};
    };

    let entries = ctx.story.lore_for_chapter(ctx.state.story.current_chapter);
    if entries.is_empty() {
        return html! {
            <div class="panel lore-panel" style="opacity:0.8;">
                <h3 style="margin:0 0 6px;">{"Lore codex"}</h3>
                {"Finish chapter 1 to unlock the first entry."}
            </div>
        };
    }

    // A stale selection from an earlier chapter falls back to the first entry.
    let current = selected
        .as_deref()
        .and_then(|id| entries.iter().find(|e| e.id == id))
        .unwrap_or(&entries[0]);

    let tabs = entries.iter().map(|entry| {
        let onclick = {
            let selected = selected.clone();
            let id = entry.id.clone();
            Callback::from(move |_| selected.set(Some(id.clone())))
        };
        let class = if entry.id == current.id { "lore-tab tab active" } else { "lore-tab tab" };
        html! { <button key={entry.id.clone()} {class} {onclick}>{ entry.title.clone() }</button> }
    });
    let paragraphs = current.paragraphs().into_iter().map(|p| html! { <p>{ p.to_string() }</p> });

    html! {
        <div class="panel lore-panel" style="display:flex; flex-direction:column; gap:6px;">
            <h3 style="margin:0;">{"Lore codex"}</h3>
            <nav class="tabs">{ for tabs }</nav>
            <div style="font-style:italic;">{ current.summary.clone() }</div>
            <div class="lore-meta" style="display:flex; gap:10px; font-size:12px; opacity:0.8;">
                <span>{ current.era.clone() }</span>
                if let Some(note) = current.unlock_note() {
                    <span>{ note }</span>
                }
            </div>
            { for paragraphs }
        </div>
    }
}
