use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::buildings_panel::BuildingsPanel;
use super::cases_panel::CasesPanel;
use super::click_panel::ClickPanel;
use super::combat_panel::CombatPanel;
use super::crafting_panel::CraftingPanel;
use super::generators_panel::GeneratorsPanel;
use super::inventory_panel::{EquippedPanel, InventoryPanel};
use super::leaderboard_panel::LeaderboardPanel;
use super::lore_panel::LorePanel;
use super::market_panel::MarketPanel;
use super::message_banner::MessageBanner;
use super::player_lookup_panel::PlayerLookupPanel;
use super::quests_panel::QuestsPanel;
use super::resource_bar::ResourceBar;
use super::temple_panel::TemplePanel;
use super::upgrades_panel::UpgradesPanel;
use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::{GameAction, GameState, LeaderEntry, StoryData};
use crate::state::{Banner, BannerScope, Interval};
use crate::util::cerror;

pub const POLL_MS: i32 = 2000;
pub const AUTO_GENERATE_MS: i32 = 1000;
pub const COMBAT_REFRESH_MS: i32 = 7000;
pub const TEMPLE_REFRESH_MS: i32 = 9000;
pub const LEADERBOARD_REFRESH_MS: i32 = 30000;

/// Shared with every panel so they can call the API and update the mirror
/// without prop drilling.
#[derive(Clone, PartialEq)]
pub struct GameContext {
    pub api: ApiClient,
    pub state: UseReducerHandle<GameState>,
    pub story: Rc<StoryData>,
    pub notify: Callback<Banner>,
}

impl GameContext {
    pub fn dispatch(&self, action: GameAction) {
        self.state.dispatch(action);
    }

    pub fn success(&self, text: impl Into<String>, scope: BannerScope) {
        self.notify.emit(Banner::success(text, scope));
    }

    /// Fetches the authoritative state, e.g. after a purchase.
    pub fn reload(&self) {
        load_game_state(self.api.clone(), self.state.dispatcher());
    }

    pub fn reload_combat(&self) {
        load_combat(self.api.clone(), self.state.dispatcher());
    }

    pub fn reload_temple(&self) {
        load_temple(self.api.clone(), self.state.dispatcher());
    }

    pub fn fail(&self, what: &str, err: &ClientError, scope: BannerScope) {
        cerror(&format!("{what}: {err}"));
        self.notify.emit(Banner::error(err.user_message(), scope));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Gather,
    Crafting,
    Inventory,
    Buildings,
    Quests,
    Market,
    Combat,
    Leaderboard,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Gather,
        Tab::Crafting,
        Tab::Inventory,
        Tab::Buildings,
        Tab::Quests,
        Tab::Market,
        Tab::Combat,
        Tab::Leaderboard,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Gather => "Gather",
            Tab::Crafting => "Crafting",
            Tab::Inventory => "Inventory",
            Tab::Buildings => "Buildings",
            Tab::Quests => "Quests",
            Tab::Market => "Market",
            Tab::Combat => "Combat",
            Tab::Leaderboard => "Leaderboard",
        }
    }
}

fn load_game_state(api: ApiClient, dispatcher: UseReducerDispatcher<GameState>) {
    spawn_local(async move {
        match api.game_state().await {
            Ok(data) => dispatcher.dispatch(GameAction::Loaded(data)),
            Err(err) => cerror(&format!("game-state: {err}")),
        }
    });
}

fn load_combat(api: ApiClient, dispatcher: UseReducerDispatcher<GameState>) {
    spawn_local(async move {
        match api.combat_overview().await {
            Ok(overview) => dispatcher.dispatch(GameAction::CombatRefreshed(overview)),
            Err(err) => cerror(&format!("combat/overview: {err}")),
        }
    });
}

fn load_temple(api: ApiClient, dispatcher: UseReducerDispatcher<GameState>) {
    spawn_local(async move {
        match api.temple_status().await {
            Ok(temple) => dispatcher.dispatch(GameAction::TempleRefreshed(temple)),
            Err(err) => cerror(&format!("temple/status: {err}")),
        }
    });
}

fn load_leaderboard(api: ApiClient, board: UseStateSetter<Vec<LeaderEntry>>) {
    spawn_local(async move {
        match api.leaderboard().await {
            Ok(entries) => board.set(entries),
            Err(err) => cerror(&format!("leaderboard: {err}")),
        }
    });
}

#[function_component(GameView)]
pub fn game_view() -> Html {
    let api = use_memo((), |_| ApiClient::default());
    let state = use_reducer(GameState::default);
    let story = use_state(|| Rc::new(StoryData::default()));
    let leaderboard = use_state(Vec::<LeaderEntry>::new);
    let tab = use_state(|| Tab::Gather);
    let banner = use_state(|| None::<Banner>);

    // Mount: story definitions first, then the state poll and generators.
    {
        let api = (*api).clone();
        let dispatcher = state.dispatcher();
        let story = story.setter();
        let board = leaderboard.setter();
        use_effect_with((), move |_| {
            {
                let api = api.clone();
                let dispatcher = dispatcher.clone();
                spawn_local(async move {
                    match api.story_data().await {
                        Ok(data) => story.set(Rc::new(data)),
                        Err(err) => cerror(&format!("story-data: {err}")),
                    }
                    load_game_state(api, dispatcher);
                });
            }
            load_leaderboard(api.clone(), board.clone());

            let poll = {
                let api = api.clone();
                let dispatcher = dispatcher.clone();
                Interval::start(POLL_MS, move || load_game_state(api.clone(), dispatcher.clone()))
            };
            let generate = {
                let api = api.clone();
                let dispatcher = dispatcher.clone();
                Interval::start(AUTO_GENERATE_MS, move || {
                    let api = api.clone();
                    let dispatcher = dispatcher.clone();
                    spawn_local(async move {
                        match api.auto_generate().await {
                            Ok(res) => dispatcher.dispatch(GameAction::Generated(res)),
                            Err(err) => cerror(&format!("auto-generate: {err}")),
                        }
                    });
                })
            };
            let refresh_board = {
                let api = api.clone();
                Interval::start(LEADERBOARD_REFRESH_MS, move || load_leaderboard(api.clone(), board.clone()))
            };
            move || drop((poll, generate, refresh_board))
        });
    }

    // Combat and temple only refresh while their tab is open.
    {
        let api = (*api).clone();
        let dispatcher = state.dispatcher();
        use_effect_with(*tab, move |tab| {
            let timers = if *tab == Tab::Combat {
                load_combat(api.clone(), dispatcher.clone());
                load_temple(api.clone(), dispatcher.clone());
                let combat = {
                    let api = api.clone();
                    let dispatcher = dispatcher.clone();
                    Interval::start(COMBAT_REFRESH_MS, move || load_combat(api.clone(), dispatcher.clone()))
                };
                let temple = Interval::start(TEMPLE_REFRESH_MS, move || load_temple(api.clone(), dispatcher.clone()));
                Some((combat, temple))
            } else {
                None
            };
            move || drop(timers)
        });
    }

    let notify = {
        let banner = banner.clone();
        Callback::from(move |b: Banner| banner.set(Some(b)))
    };
    let on_banner_expire = {
        let banner = banner.clone();
        Callback::from(move |id: u64| {
            if banner.as_ref().is_some_and(|b| b.id == id) {
                banner.set(None);
            }
        })
    };

    let ctx = GameContext {
        api: (*api).clone(),
        state: state.clone(),
        story: (*story).clone(),
        notify,
    };

    let tabs = Tab::ALL.iter().map(|t| {
        let tab_handle = tab.clone();
        let t = *t;
        let onclick = Callback::from(move |_| tab_handle.set(t));
        let class = if *tab == t { "tab active" } else { "tab" };
        html! { <button {class} {onclick}>{ t.label() }</button> }
    });

    let content = if !state.loaded {
        html! { <div class="loading">{"Loading game state…"}</div> }
    } else {
        match *tab {
            Tab::Gather => html! {
                <div class="tab-body">
                    <ClickPanel />
                    <UpgradesPanel />
                    <GeneratorsPanel />
                </div>
            },
            Tab::Crafting => html! { <CraftingPanel /> },
            Tab::Inventory => html! {
                <div class="tab-body">
                    <EquippedPanel />
                    <InventoryPanel />
                </div>
            },
            Tab::Buildings => html! { <BuildingsPanel /> },
            Tab::Quests => html! {
                <div class="tab-body">
                    <QuestsPanel />
                    <LorePanel />
                </div>
            },
            Tab::Market => html! {
                <div class="tab-body">
                    <MarketPanel />
                    <CasesPanel />
                </div>
            },
            Tab::Combat => html! {
                <div class="tab-body">
                    <CombatPanel />
                    <TemplePanel />
                </div>
            },
            Tab::Leaderboard => html! {
                <div class="tab-body">
                    <LeaderboardPanel entries={(*leaderboard).clone()} />
                    <PlayerLookupPanel />
                </div>
            },
        }
    };

    html! {
        <ContextProvider<GameContext> context={ctx}>
            <div class="game-view">
                <MessageBanner banner={(*banner).clone()} on_expire={on_banner_expire} />
                <ResourceBar />
                <nav class="tabs">{ for tabs }</nav>
                { content }
            </div>
        </ContextProvider<GameContext>>
    }
}
