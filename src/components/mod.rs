pub mod app;
pub mod buildings_panel;
pub mod cases_panel;
pub mod click_panel;
pub mod combat_panel;
pub mod crafting_panel;
pub mod game_view;
pub mod generators_panel;
pub mod idle_view;
pub mod inventory_panel;
pub mod leaderboard_panel;
pub mod lore_panel;
pub mod market_panel;
pub mod message_banner;
pub mod player_lookup_panel;
pub mod quests_panel;
pub mod resource_bar;
pub mod temple_panel;
pub mod upgrades_panel;
