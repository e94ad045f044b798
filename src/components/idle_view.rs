use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::engine::save::SaveData;
use crate::engine::{GameEngine, IdleAction, IdleState, StatusKind};
use crate::error::ClientError;
use crate::state::{BannerScope, Interval, Timeout};
use crate::storage::{IDLE_ENGINE_KEY, Store};
use crate::util::{cerror, cwarn, format_idle_number};

pub const AUTOSAVE_MS: i32 = 10_000;

/// Longest frame gap fed to the engine; a backgrounded tab resumes without a burst.
const MAX_FRAME_SECS: f64 = 1.0;

fn save_engine(engine: &GameEngine) -> Result<(), ClientError> {
    let save = engine.snapshot(js_sys::Date::now());
    Store::local()?.save_json(IDLE_ENGINE_KEY, &save)
}

/// Writes the engine held in `engine` through `save` when dropped.
pub struct SaveOnDrop<F: Fn(&GameEngine)> {
    engine: Rc<RefCell<GameEngine>>,
    save: F,
}

impl<F: Fn(&GameEngine)> SaveOnDrop<F> {
    pub fn new(engine: Rc<RefCell<GameEngine>>, save: F) -> Self {
        Self { engine, save }
    }
}

impl<F: Fn(&GameEngine)> Drop for SaveOnDrop<F> {
    fn drop(&mut self) {
        (self.save)(&self.engine.borrow());
    }
}

fn persist(engine: &GameEngine, context: &str) {
    if let Err(err) = save_engine(engine) {
        cerror(&format!("{context}: {err}"));
    }
}

fn load_save() -> Result<Option<SaveData>, ClientError> {
    Store::local()?.load_json(IDLE_ENGINE_KEY)
}

fn rate_of(engine: &GameEngine, resource: &str) -> f64 {
    let Some(res) = engine.resource(resource) else {
        return 0.0;
    };
    let prestige = engine.global_multiplier();
    engine
        .workers
        .iter()
        .filter(|w| w.produces == resource)
        .map(|w| w.production_per_second(res.multiplier, prestige))
        .sum()
}

#[function_component(IdleView)]
pub fn idle_view() -> Html {
    let state = use_reducer(IdleState::default);
    // Latest engine for the autosave timer, which outlives any single render.
    let latest = use_mut_ref(GameEngine::default);
    *latest.borrow_mut() = state.engine.clone();

    // Mount: restore, start the frame loop and autosave. Unmount writes a final save.
    {
        let dispatcher = state.dispatcher();
        let latest = latest.clone();
        use_effect_with((), move |_| {
            let final_save = SaveOnDrop::new(latest.clone(), |engine: &GameEngine| persist(engine, "save on leave"));
            match load_save() {
                Ok(Some(save)) => dispatcher.dispatch(IdleAction::Restore(save)),
                Ok(None) => {}
                Err(err) => cwarn(&format!("idle save unreadable: {err}")),
            }

            let window = web_sys::window();
            let raf_id = Rc::new(Cell::new(None::<i32>));
            let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            if let Some(window) = window.clone() {
                let last = Cell::new(js_sys::Date::now());
                let frame_loop = frame.clone();
                let raf_loop = raf_id.clone();
                let dispatcher = dispatcher.clone();
                *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let now = js_sys::Date::now();
                    let dt = ((now - last.replace(now)) / 1000.0).min(MAX_FRAME_SECS);
                    dispatcher.dispatch(IdleAction::Tick { dt });
                    if let Some(cb) = frame_loop.borrow().as_ref() {
                        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            raf_loop.set(Some(id));
                        }
                    }
                }) as Box<dyn FnMut()>));
            }
            if let (Some(window), Some(cb)) = (window.as_ref(), frame.borrow().as_ref()) {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }

            let autosave = Interval::start(AUTOSAVE_MS, move || persist(&latest.borrow(), "autosave"));

            move || {
                if let (Some(window), Some(id)) = (window, raf_id.get()) {
                    let _ = window.cancel_animation_frame(id);
                }
                frame.borrow_mut().take();
                drop(autosave);
                drop(final_save);
            }
        });
    }

    // Prestige and hard reset are persisted immediately.
    {
        let latest = latest.clone();
        use_effect_with(state.save_requested, move |requested| {
            if *requested > 0 {
                persist(&latest.borrow(), "save after reset");
            }
            || ()
        });
    }

    // Status flash.
    {
        let dispatcher = state.dispatcher();
        use_effect_with(state.status.clone(), move |status| {
            let timer = status.is_some().then(|| {
                Timeout::start(BannerScope::Idle.ttl_ms(), move || dispatcher.dispatch(IdleAction::ClearStatus))
            });
            move || drop(timer)
        });
    }

    let engine = &state.engine;

    let on_click = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(IdleAction::Click))
    };
    let on_prestige = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(IdleAction::Prestige))
    };
    let on_save = {
        let state = state.clone();
        Callback::from(move |_| match save_engine(&state.engine) {
            Ok(()) => state.dispatch(IdleAction::SetStatus("Game saved.".to_string())),
            Err(err) => {
                cerror(&format!("save: {err}"));
                state.dispatch(IdleAction::SetError(err.user_message()));
            }
        })
    };
    let on_reset = {
        let state = state.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Wipe the idle demo, prestige included?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            if let Err(err) = Store::local().and_then(|s| s.remove(IDLE_ENGINE_KEY)) {
                cwarn(&format!("reset: {err}"));
            }
            state.dispatch(IdleAction::HardReset);
        })
    };

    let resources = engine.resources.iter().map(|r| {
        html! {
            <div class="idle-resource" key={r.name.clone()} style="display:flex; justify-content:space-between; gap:10px;">
                <span style="font-weight:600;">{ r.name.clone() }</span>
                <span>{ format_idle_number(r.amount) }</span>
                <span style="opacity:0.8;">{ format!("{}/s", format_idle_number(rate_of(engine, &r.name))) }</span>
                <span style="opacity:0.6;">{ format!("×{:.2}", r.multiplier) }</span>
            </div>
        }
    });

    let workers = engine.workers.iter().map(|w| {
        if !engine.worker_unlocked(w) {
            return html! {
                <div class="card locked" key={w.name.clone()} style="padding:6px 10px; opacity:0.5;">
                    { format!("🔒 {}", w.name) }
                </div>
            };
        }
        let onclick = {
            let state = state.clone();
            let name = w.name.clone();
            Callback::from(move |_| state.dispatch(IdleAction::HireWorker(name.clone())))
        };
        html! {
            <div class="card worker-card" key={w.name.clone()} style="display:flex; gap:10px; align-items:center; padding:6px 10px;">
                <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                    <span style="font-weight:600;">{ format!("{} ×{}", w.name, w.owned) }</span>
                    <span style="font-size:12px; opacity:0.8;">{ w.description.clone() }</span>
                    <span style="font-size:12px;">
                        { format!("{}/s {} each", format_idle_number(w.base_rate()), w.produces) }
                    </span>
                </div>
                <button {onclick} disabled={!engine.worker_affordable(w)}>
                    { format!("Hire · {} {}", format_idle_number(w.current_cost()), w.cost_resource) }
                </button>
            </div>
        }
    });

    let upgrades = engine.upgrades.iter().filter(|u| engine.upgrade_visible(u)).map(|u| {
        let onclick = {
            let state = state.clone();
            let name = u.name.clone();
            Callback::from(move |_| state.dispatch(IdleAction::BuyUpgrade(name.clone())))
        };
        html! {
            <div class={classes!("card", "idle-upgrade", u.purchased.then_some("purchased"))} key={u.name.clone()}
                 style="display:flex; gap:10px; align-items:center; padding:6px 10px;">
                <div style="flex:1; display:flex; flex-direction:column; gap:2px;">
                    <span style="font-weight:600;">{ format!("{} ({})", u.name, u.effect.label()) }</span>
                    <span style="font-size:12px; opacity:0.8;">{ u.description.clone() }</span>
                </div>
                if u.purchased {
                    <span class="badge built">{"✔"}</span>
                } else {
                    <button {onclick} disabled={!engine.upgrade_affordable(u)}>
                        { format!("Buy · {} {}", format_idle_number(u.cost.amount), u.cost.resource) }
                    </button>
                }
            </div>
        }
    });

    let status = state.status.as_ref().map(|(text, kind)| {
        let class = match kind {
            StatusKind::Info => "banner banner-success",
            StatusKind::Error => "banner banner-error",
        };
        html! { <div {class} role="status">{ text.clone() }</div> }
    });

    html! {
        <div class="idle-view" style="display:flex; flex-direction:column; gap:12px;">
            { for status }
            <div class="panel" style="display:flex; flex-direction:column; gap:4px;">
                { for resources }
                <div style="font-size:12px; opacity:0.7;">
                    { format!("Total generated {}", format_idle_number(engine.total_generated)) }
                </div>
            </div>
            <div style="display:flex; gap:8px;">
                <button onclick={on_click}>
                    { format!("Rally (+{} {})", format_idle_number(engine.manual_gain()), engine.config.primary_resource) }
                </button>
                <button onclick={on_save}>{"Save"}</button>
                <button onclick={on_reset} class="danger">{"Reset"}</button>
            </div>
            <div class="panel" style="display:flex; flex-direction:column; gap:6px;">
                <h3 style="margin:0;">{"Workers"}</h3>
                { for workers }
            </div>
            <div class="panel" style="display:flex; flex-direction:column; gap:6px;">
                <h3 style="margin:0;">{"Upgrades"}</h3>
                { for upgrades }
            </div>
            <div class="panel prestige" style="display:flex; gap:10px; align-items:center;">
                <div style="flex:1; font-size:13px;">
                    { format!(
                        "Prestige {} (lifetime {}) · ×{:.2} production · next reset grants {}",
                        engine.prestige.owned,
                        engine.prestige.lifetime,
                        engine.global_multiplier(),
                        engine.potential_prestige()
                    ) }
                </div>
                <button onclick={on_prestige} disabled={!engine.can_prestige()}>{"Prestige"}</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_on_drop_writes_the_latest_engine() {
        let engine = Rc::new(RefCell::new(GameEngine::default()));
        let written = Rc::new(Cell::new(None::<f64>));
        let guard = {
            let written = written.clone();
            SaveOnDrop::new(engine.clone(), move |e: &GameEngine| written.set(Some(e.total_generated)))
        };
        engine.borrow_mut().total_generated = 77.0;
        assert_eq!(written.get(), None);
        drop(guard);
        assert_eq!(written.get(), Some(77.0));
    }

    #[test]
    fn rate_sums_workers_for_resource() {
        let mut engine = GameEngine::default();
        engine.workers[0].owned = 2;
        let primary = engine.config.primary_resource.clone();
        assert!((rate_of(&engine, &primary) - 2.0 * 0.5).abs() < 1e-9);
        assert_eq!(rate_of(&engine, "missing"), 0.0);
    }
}
