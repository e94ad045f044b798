//! Wire types for the game REST API and the client-side mirror of the
//! player's state. Server responses are authoritative: every action below
//! overwrites the mirrored fields it carries and leaves the rest alone.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::Reducible;

use crate::catalog;
use crate::util::format_cost_value;

pub type CostMap = BTreeMap<String, f64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Gooncoins,
    Astma,
    Poharky,
    Mrkev,
    Uzene,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Gooncoins,
        ResourceKind::Astma,
        ResourceKind::Poharky,
        ResourceKind::Mrkev,
        ResourceKind::Uzene,
    ];

    /// Key used by the server in payloads and cost maps.
    pub fn key(self) -> &'static str {
        match self {
            ResourceKind::Gooncoins => "gooncoins",
            ResourceKind::Astma => "astma",
            ResourceKind::Poharky => "poharky",
            ResourceKind::Mrkev => "mrkev",
            ResourceKind::Uzene => "uzené",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub gooncoins: f64,
    #[serde(default)]
    pub astma: f64,
    #[serde(default)]
    pub poharky: f64,
    #[serde(default)]
    pub mrkev: f64,
    #[serde(rename = "uzené", default)]
    pub uzene: f64,
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Gooncoins => self.gooncoins,
            ResourceKind::Astma => self.astma,
            ResourceKind::Poharky => self.poharky,
            ResourceKind::Mrkev => self.mrkev,
            ResourceKind::Uzene => self.uzene,
        }
    }

    pub fn set(&mut self, kind: ResourceKind, value: f64) {
        let slot = match kind {
            ResourceKind::Gooncoins => &mut self.gooncoins,
            ResourceKind::Astma => &mut self.astma,
            ResourceKind::Poharky => &mut self.poharky,
            ResourceKind::Mrkev => &mut self.mrkev,
            ResourceKind::Uzene => &mut self.uzene,
        };
        *slot = value;
    }

    /// Keys outside the five primary resources are not mirrored, so any
    /// positive amount of them counts as unaffordable.
    pub fn can_afford(&self, cost: &CostMap) -> bool {
        cost.iter().all(|(key, amount)| match ResourceKind::from_key(key) {
            Some(kind) => self.get(kind) >= *amount,
            None => *amount <= 0.0,
        })
    }

    /// Deducts the whole cost or nothing.
    pub fn spend(&mut self, cost: &CostMap) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for (key, amount) in cost {
            if let Some(kind) = ResourceKind::from_key(key) {
                self.set(kind, self.get(kind) - amount);
            }
        }
        true
    }
}

/// Resource fields as they appear flattened into most responses. Every key
/// is optional because endpoints only echo the balances they touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct ResourcePayload {
    #[serde(default)]
    pub gooncoins: Option<f64>,
    #[serde(default)]
    pub astma: Option<f64>,
    #[serde(default)]
    pub poharky: Option<f64>,
    #[serde(default)]
    pub mrkev: Option<f64>,
    #[serde(rename = "uzené", default)]
    pub uzene: Option<f64>,
}

impl ResourcePayload {
    pub fn get(&self, kind: ResourceKind) -> Option<f64> {
        match kind {
            ResourceKind::Gooncoins => self.gooncoins,
            ResourceKind::Astma => self.astma,
            ResourceKind::Poharky => self.poharky,
            ResourceKind::Mrkev => self.mrkev,
            ResourceKind::Uzene => self.uzene,
        }
    }

    pub fn apply_to(&self, resources: &mut Resources) {
        for kind in ResourceKind::ALL {
            if let Some(v) = self.get(kind) {
                resources.set(kind, v);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        ResourceKind::ALL.iter().all(|k| self.get(*k).is_none())
    }
}

fn one() -> f64 {
    1.0
}

fn first_chapter() -> u32 {
    1
}

fn base_currencies() -> Vec<String> {
    vec!["gooncoins".to_string()]
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StoryProgress {
    #[serde(default = "first_chapter")]
    pub current_chapter: u32,
    #[serde(default)]
    pub completed_quests: Vec<String>,
    #[serde(default)]
    pub unlocked_buildings: Vec<String>,
    #[serde(default = "base_currencies")]
    pub unlocked_currencies: Vec<String>,
}

impl Default for StoryProgress {
    fn default() -> Self {
        Self {
            current_chapter: first_chapter(),
            completed_quests: Vec::new(),
            unlocked_buildings: Vec::new(),
            unlocked_currencies: base_currencies(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct MarketRate {
    #[serde(default)]
    pub buy: f64,
    #[serde(default)]
    pub sell: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Economy {
    #[serde(default)]
    pub inflation_rate: f64,
    #[serde(default = "one")]
    pub inflation_multiplier: f64,
    #[serde(default)]
    pub gooncoin_supply: f64,
    #[serde(default = "one")]
    pub market_multiplier: f64,
    #[serde(default)]
    pub market_rates: BTreeMap<String, MarketRate>,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            inflation_rate: 0.0,
            inflation_multiplier: 1.0,
            gooncoin_supply: 0.0,
            market_multiplier: 1.0,
            market_rates: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

impl Trend {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "up" => Trend::Up,
            "down" => Trend::Down,
            _ => Trend::Flat,
        }
    }

    /// Inflation moves under 0.1 percentage points read as flat.
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous + 0.001 {
            Trend::Up
        } else if current < previous - 0.001 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Flat => "↔",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Trend::Up => "trend-up",
            Trend::Down => "trend-down",
            Trend::Flat => "trend-flat",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CombatProfile {
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub campaign_stage: u32,
    #[serde(default)]
    pub defeated_monsters: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameStateResponse {
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub upgrades: BTreeMap<String, u32>,
    #[serde(default)]
    pub story: StoryProgress,
    #[serde(default)]
    pub equipment: BTreeMap<String, String>,
    #[serde(default)]
    pub equipment_counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub buildings: BTreeMap<String, u32>,
    #[serde(default)]
    pub generation_rates: BTreeMap<String, f64>,
    #[serde(default)]
    pub economy: Option<Economy>,
    #[serde(default)]
    pub rare_materials: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub combat: Option<CombatProfile>,
    #[serde(default)]
    pub temple: Option<TempleSnapshot>,
    #[serde(default)]
    pub inventory: Option<Inventory>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClickResponse {
    #[serde(default)]
    pub gooncoins: f64,
    #[serde(default)]
    pub click_value: Option<f64>,
    #[serde(default)]
    pub total_clicks: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AutoGenerateResponse {
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub generation_rates: Option<BTreeMap<String, f64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BuyUpgradeResponse {
    #[serde(default)]
    pub new_level: Option<u32>,
    #[serde(flatten)]
    pub resources: ResourcePayload,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CraftResponse {
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub equipment_counts: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub equipment: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub inventory: Option<Inventory>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BuildResponse {
    #[serde(flatten)]
    pub resources: ResourcePayload,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct QuestResponse {
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub unlocked_currencies: Option<Vec<String>>,
    #[serde(default)]
    pub unlocked_buildings: Option<Vec<String>>,
    #[serde(default)]
    pub current_chapter: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MarketResponse {
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub economy: Option<Economy>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EconomyResponse {
    #[serde(default)]
    pub economy: Economy,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LeaderEntry {
    pub username: String,
    #[serde(default)]
    pub gooncoins: f64,
    #[serde(default)]
    pub total_clicks: u64,
}

// Story and content definitions served by /api/story-data.

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct QuestRequirement {
    #[serde(default)]
    pub total_clicks: Option<f64>,
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub buildings: Option<Vec<String>>,
    #[serde(default)]
    pub equipment_count: Option<u32>,
    #[serde(default)]
    pub equipment_owned: Option<BTreeMap<String, u32>>,
}

impl QuestRequirement {
    pub fn is_empty(&self) -> bool {
        self.total_clicks.is_none()
            && self.resources.is_empty()
            && self.buildings.is_none()
            && self.equipment_count.is_none()
            && self.equipment_owned.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct QuestDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirement: QuestRequirement,
    #[serde(default)]
    pub reward: CostMap,
    #[serde(default)]
    pub unlocks: Vec<String>,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quests: Vec<QuestDef>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EquipmentDef {
    pub name: String,
    #[serde(default)]
    pub slot: String,
    #[serde(default)]
    pub bonus: BTreeMap<String, f64>,
    #[serde(default)]
    pub cost: CostMap,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub unlock_requirement: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub release_order: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BuildingDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: CostMap,
    #[serde(default)]
    pub always_available: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StoryData {
    /// Keyed by chapter number as a string.
    #[serde(default)]
    pub chapters: BTreeMap<String, Chapter>,
    #[serde(default)]
    pub equipment: BTreeMap<String, EquipmentDef>,
    #[serde(default)]
    pub buildings: BTreeMap<String, BuildingDef>,
    #[serde(default)]
    pub equipment_counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub lore_entries: Vec<LoreEntry>,
}

impl StoryData {
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.get(&number.to_string())
    }

    pub fn equipment_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.equipment.get(id).map(|d| d.name.as_str()).unwrap_or(id)
    }

    pub fn building_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.buildings.get(id).map(|d| d.name.as_str()).unwrap_or(id)
    }

    /// Codex entries readable at `chapter`, in server order.
    pub fn lore_for_chapter(&self, chapter: u32) -> Vec<&LoreEntry> {
        self.lore_entries
            .iter()
            .filter(|e| e.required_chapter.is_none_or(|c| c <= chapter))
            .collect()
    }
}

/// Lore body text arrives either as one string or as paragraphs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LoreBody {
    Paragraphs(Vec<String>),
    Text(String),
}

impl Default for LoreBody {
    fn default() -> Self {
        LoreBody::Paragraphs(Vec::new())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoreEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub era: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: LoreBody,
    #[serde(default)]
    pub required_chapter: Option<u32>,
}

impl LoreEntry {
    pub fn paragraphs(&self) -> Vec<&str> {
        match &self.body {
            LoreBody::Paragraphs(list) => list.iter().map(String::as_str).collect(),
            LoreBody::Text(text) => vec![text.as_str()],
        }
    }

    /// Entries from the first chapter carry no unlock note.
    pub fn unlock_note(&self) -> Option<String> {
        self.required_chapter
            .filter(|c| *c > 1)
            .map(|c| format!("Unlocked in chapter {c}"))
    }
}

// Combat.

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CombatStats {
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub luck: f64,
    #[serde(default)]
    pub hp: f64,
    #[serde(default)]
    pub power_score: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Opponent {
    pub username: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(flatten)]
    pub stats: CombatStats,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LogParty {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CombatLog {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub winner_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub attacker: LogParty,
    #[serde(default)]
    pub defender: LogParty,
}

impl CombatLog {
    pub fn winner_name(&self) -> Option<&str> {
        let winner = self.winner_id?;
        [&self.attacker, &self.defender]
            .into_iter()
            .find(|p| p.id == Some(winner))
            .and_then(|p| p.username.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PvpSection {
    #[serde(default)]
    pub opponents: Vec<Opponent>,
    #[serde(default)]
    pub recent_logs: Vec<CombatLog>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Rewards {
    #[serde(default)]
    pub gooncoins: f64,
    #[serde(default)]
    pub favor: f64,
    #[serde(default)]
    pub rare_materials: BTreeMap<String, f64>,
}

impl Rewards {
    pub fn is_empty(&self) -> bool {
        self.gooncoins <= 0.0 && self.favor <= 0.0 && self.rare_materials.values().all(|v| *v <= 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterStatus {
    Next,
    Repeatable,
    Defeated,
    Locked,
}

impl MonsterStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "next" => MonsterStatus::Next,
            "repeatable" => MonsterStatus::Repeatable,
            "defeated" => MonsterStatus::Defeated,
            _ => MonsterStatus::Locked,
        }
    }

    pub fn can_fight(self) -> bool {
        matches!(self, MonsterStatus::Next | MonsterStatus::Repeatable)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Monster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tier: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stats: CombatStats,
    #[serde(default)]
    pub rewards: Rewards,
    #[serde(default)]
    pub status: String,
}

impl Monster {
    pub fn status(&self) -> MonsterStatus {
        MonsterStatus::from_wire(&self.status)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Campaign {
    #[serde(default)]
    pub stage: u32,
    #[serde(default)]
    pub monsters: Vec<Monster>,
    #[serde(default)]
    pub next_monster: Option<Monster>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RareMaterialDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CombatOverview {
    #[serde(default)]
    pub player_stats: CombatStats,
    #[serde(default)]
    pub profile: CombatProfile,
    #[serde(default)]
    pub rare_materials: BTreeMap<String, f64>,
    #[serde(default)]
    pub pvp: PvpSection,
    #[serde(default)]
    pub campaign: Campaign,
    #[serde(default)]
    pub rare_material_defs: BTreeMap<String, RareMaterialDef>,
}

/// Result of a PvP, campaign or temple fight.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BattleResponse {
    #[serde(default)]
    pub player_won: bool,
    /// PvP pays a flat Gooncoin amount.
    #[serde(default)]
    pub reward: Option<f64>,
    #[serde(default)]
    pub rewards: Option<Rewards>,
    #[serde(default)]
    pub gooncoins: Option<f64>,
    #[serde(default)]
    pub rare_materials: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub temple: Option<TempleSnapshot>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub monster_name: Option<String>,
    #[serde(default)]
    pub enemy_name: Option<String>,
}

impl BattleResponse {
    pub fn enemy(&self) -> &str {
        self.opponent
            .as_deref()
            .or(self.monster_name.as_deref())
            .or(self.enemy_name.as_deref())
            .unwrap_or("the enemy")
    }

    pub fn outcome_text(&self) -> String {
        if !self.player_won {
            return format!("Defeat against {}.", self.enemy());
        }
        let mut gains = Vec::new();
        if let Some(coins) = self.reward.filter(|c| *c > 0.0) {
            gains.push(format!("+{} Gooncoins", crate::util::format_number(coins)));
        }
        if let Some(rewards) = &self.rewards {
            if rewards.gooncoins > 0.0 {
                gains.push(format!("+{} Gooncoins", crate::util::format_number(rewards.gooncoins)));
            }
            if rewards.favor > 0.0 {
                gains.push(format!("+{} favor", crate::util::format_number(rewards.favor)));
            }
            for (key, amount) in rewards.rare_materials.iter().filter(|(_, v)| **v > 0.0) {
                gains.push(format!("+{} {}", crate::util::format_number(*amount), key));
            }
        }
        if gains.is_empty() {
            format!("Victory over {}!", self.enemy())
        } else {
            format!("Victory over {}! {}", self.enemy(), gains.join(", "))
        }
    }
}

// Temple.

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TempleRoom {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// locked | available | active | cleared
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub required_kills: u32,
    #[serde(default)]
    pub boss_ready: bool,
    #[serde(default)]
    pub boss_name: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub enemy_preview: Vec<String>,
    #[serde(default)]
    pub boss_rewards: Rewards,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Blessing {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: CostMap,
    #[serde(default)]
    pub bonus: BTreeMap<String, f64>,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ActiveBlessing {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TempleSnapshot {
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub favor: f64,
    #[serde(default)]
    pub cooldown_seconds: u64,
    #[serde(default)]
    pub active_room: Option<String>,
    #[serde(default)]
    pub active_blessing: Option<ActiveBlessing>,
    #[serde(default)]
    pub rooms: Vec<TempleRoom>,
    #[serde(default)]
    pub blessings: Vec<Blessing>,
}

impl Blessing {
    /// Flat stat bonuses, known stats first with their icons.
    pub fn bonus_text(&self) -> String {
        const KNOWN: [(&str, &str); 4] = [("attack", "⚔"), ("defense", "🛡"), ("luck", "💫"), ("hp", "❤️")];
        let mut parts: Vec<String> = KNOWN
            .iter()
            .filter_map(|(stat, icon)| {
                let value = *self.bonus.get(*stat)?;
                (value != 0.0).then(|| format!("{icon} +{}", format_cost_value(value)))
            })
            .collect();
        parts.extend(
            self.bonus
                .iter()
                .filter(|(stat, v)| **v != 0.0 && !KNOWN.iter().any(|(k, _)| *k == stat.as_str()))
                .map(|(stat, v)| format!("+{} {stat}", format_cost_value(*v))),
        );
        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl TempleSnapshot {
    /// Favor is held by the temple, not in the resource wallet.
    pub fn covers(&self, key: &str, amount: f64, resources: &Resources) -> bool {
        if key == "favor" {
            return self.favor >= amount;
        }
        match ResourceKind::from_key(key) {
            Some(kind) => resources.get(kind) >= amount,
            None => amount <= 0.0,
        }
    }

    pub fn can_afford(&self, blessing: &Blessing, resources: &Resources) -> bool {
        blessing
            .cost
            .iter()
            .all(|(key, amount)| self.covers(key, *amount, resources))
    }

    pub fn is_active(&self, blessing: &Blessing) -> bool {
        self.active_blessing
            .as_ref()
            .is_some_and(|active| active.id == blessing.id)
    }

    /// A ritual needs the shrine off cooldown, the blessing not already
    /// running and every cost covered.
    pub fn ritual_available(&self, blessing: &Blessing, resources: &Resources, cooldown_ready: bool) -> bool {
        cooldown_ready && !self.is_active(blessing) && self.can_afford(blessing, resources)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TempleResponse {
    #[serde(default)]
    pub temple: TempleSnapshot,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RitualResponse {
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub temple: Option<TempleSnapshot>,
}

// Loot cases.

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CaseItem {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub weight: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CaseDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub items: Vec<CaseItem>,
}

impl CaseDef {
    /// Drop chance of each item in percent.
    pub fn odds(&self) -> Vec<(&CaseItem, f64)> {
        let total: f64 = self.items.iter().map(|i| i.weight.max(0.0)).sum();
        self.items
            .iter()
            .map(|i| {
                let pct = if total > 0.0 { i.weight.max(0.0) / total * 100.0 } else { 0.0 };
                (i, pct)
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CaseHistoryEntry {
    #[serde(default)]
    pub case_id: String,
    #[serde(default)]
    pub case_name: String,
    #[serde(default)]
    pub reward_type: String,
    #[serde(default)]
    pub reward_label: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CasesResponse {
    #[serde(default)]
    pub cases: Vec<CaseDef>,
    #[serde(default)]
    pub history: Vec<CaseHistoryEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CaseReward {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CaseOpenResponse {
    #[serde(default)]
    pub case_id: String,
    #[serde(default)]
    pub reward: Option<CaseReward>,
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub equipment_counts: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub rare_materials: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub history: Vec<CaseHistoryEntry>,
}

// Inventory and item market.

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ItemMarketInfo {
    #[serde(default)]
    pub base_value: f64,
    #[serde(default = "unit_multiplier")]
    pub price_multiplier: f64,
    #[serde(default)]
    pub market_value: f64,
    #[serde(default)]
    pub sell_value: f64,
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub current_supply: Option<i64>,
}

fn unit_multiplier() -> f64 {
    1.0
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct InventoryItem {
    pub instance_id: i64,
    pub equipment_id: String,
    #[serde(default)]
    pub slot: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub equipped: bool,
    #[serde(default)]
    pub acquired_at: Option<String>,
    #[serde(default)]
    pub acquired_via: Option<String>,
    #[serde(default)]
    pub acquisition_note: Option<String>,
    #[serde(default)]
    pub base_value: f64,
    #[serde(default)]
    pub market_value: f64,
    #[serde(default)]
    pub sell_value: f64,
    #[serde(default)]
    pub market_trend: String,
}

fn first_positive(values: &[f64]) -> f64 {
    values.iter().copied().find(|v| *v > 0.0).unwrap_or(0.0)
}

impl InventoryItem {
    pub fn value(&self) -> f64 {
        first_positive(&[self.market_value, self.base_value])
    }

    pub fn sell_price(&self) -> f64 {
        first_positive(&[self.sell_value, self.market_value, self.base_value])
    }

    pub fn trend(&self) -> Trend {
        Trend::from_wire(&self.market_trend)
    }

    fn matches(&self, needle: &str) -> bool {
        [
            Some(self.name.as_str()),
            Some(self.slot.as_str()),
            Some(self.equipment_id.as_str()),
            self.acquired_via.as_deref(),
            self.acquisition_note.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct InventorySummary {
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub equipped_items: u32,
    #[serde(default)]
    pub duplicates: u32,
    #[serde(default)]
    pub estimated_sell_value: f64,
    #[serde(default)]
    pub rarity_breakdown: BTreeMap<String, u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    #[serde(default)]
    pub summary: InventorySummary,
    #[serde(default)]
    pub market: BTreeMap<String, ItemMarketInfo>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Inventory {
    /// Newest first. `rarity` of `None` keeps every rarity; the search is
    /// case-insensitive over name, slot, id and acquisition details.
    pub fn filtered(&self, rarity: Option<&str>, search: &str) -> Vec<&InventoryItem> {
        let needle = search.trim().to_lowercase();
        let mut items: Vec<&InventoryItem> = self
            .items
            .iter()
            .filter(|item| rarity.is_none_or(|r| item.rarity == r))
            .filter(|item| needle.is_empty() || item.matches(&needle))
            .collect();
        // ISO timestamps order lexically.
        items.sort_by(|a, b| b.acquired_at.cmp(&a.acquired_at));
        items
    }

    /// Items whose price moved the most, highest multiplier first.
    pub fn trending(&self, limit: usize) -> Vec<(&str, &ItemMarketInfo)> {
        let mut entries: Vec<(&str, &ItemMarketInfo)> =
            self.market.iter().map(|(id, info)| (id.as_str(), info)).collect();
        entries.sort_by(|a, b| b.1.price_multiplier.total_cmp(&a.1.price_multiplier));
        entries.truncate(limit);
        entries
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct InventoryResponse {
    #[serde(default)]
    pub inventory: Inventory,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SellResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub resources: ResourcePayload,
    #[serde(default)]
    pub equipment_counts: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub equipment: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub inventory: Option<Inventory>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EquippedSlot {
    pub slot: String,
    pub id: String,
}

/// Another player's worn equipment.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PlayerEquipment {
    pub username: String,
    #[serde(default)]
    pub equipment: Vec<EquippedSlot>,
}

// Pure game rules mirrored on the client.

pub fn click_value(upgrades: &BTreeMap<String, u32>) -> f64 {
    let levels: u32 = catalog::CLICK_UPGRADES
        .iter()
        .map(|k| upgrades.get(*k).copied().unwrap_or(0))
        .sum();
    1.0 + 0.5 * levels as f64
}

/// Only the Gooncoin portion of a cost follows inflation.
pub fn apply_inflation(cost: &CostMap, multiplier: f64) -> CostMap {
    let mut inflated = cost.clone();
    if let Some(coins) = inflated.get_mut(ResourceKind::Gooncoins.key()) {
        *coins *= multiplier;
    }
    inflated
}

pub fn upgrade_cost(key: &str, level: u32, inflation: f64) -> Option<CostMap> {
    let info = catalog::upgrade(key)?;
    let scale = 1.5f64.powi(level as i32);
    let scaled: CostMap = info
        .base_cost
        .iter()
        .map(|(kind, amount)| (kind.key().to_string(), amount * scale))
        .collect();
    Some(apply_inflation(&scaled, inflation))
}

pub fn generator_rates(upgrades: &BTreeMap<String, u32>) -> BTreeMap<ResourceKind, f64> {
    catalog::GENERATORS
        .iter()
        .map(|g| {
            let level = upgrades.get(g.upgrade_key).copied().unwrap_or(0);
            (g.produces, level as f64 * g.rate_per_level)
        })
        .collect()
}

/// Server-reported rates win whenever they are positive.
pub fn effective_rates(
    server: &BTreeMap<String, f64>,
    upgrades: &BTreeMap<String, u32>,
) -> BTreeMap<ResourceKind, f64> {
    let mut rates = generator_rates(upgrades);
    for (kind, rate) in rates.iter_mut() {
        if let Some(reported) = server.get(kind.key()).copied().filter(|r| *r > 0.0) {
            *rate = reported;
        }
    }
    rates
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub loaded: bool,
    pub resources: Resources,
    pub total_clicks: u64,
    pub click_value: f64,
    pub upgrades: BTreeMap<String, u32>,
    pub story: StoryProgress,
    pub equipment: BTreeMap<String, String>,
    pub equipment_counts: BTreeMap<String, u32>,
    pub buildings: BTreeMap<String, u32>,
    pub generation_rates: BTreeMap<String, f64>,
    pub economy: Option<Economy>,
    pub inflation_trend: Trend,
    pub rare_materials: BTreeMap<String, f64>,
    pub combat: CombatProfile,
    pub combat_overview: Option<CombatOverview>,
    pub temple: Option<TempleSnapshot>,
    pub inventory: Option<Inventory>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            loaded: false,
            resources: Resources::default(),
            total_clicks: 0,
            click_value: 1.0,
            upgrades: BTreeMap::new(),
            story: StoryProgress::default(),
            equipment: BTreeMap::new(),
            equipment_counts: BTreeMap::new(),
            buildings: BTreeMap::new(),
            generation_rates: BTreeMap::new(),
            economy: None,
            inflation_trend: Trend::Flat,
            rare_materials: BTreeMap::new(),
            combat: CombatProfile::default(),
            combat_overview: None,
            temple: None,
            inventory: None,
        }
    }
}

impl GameState {
    pub fn level(&self, upgrade: &str) -> u32 {
        self.upgrades.get(upgrade).copied().unwrap_or(0)
    }

    pub fn inflation_multiplier(&self) -> f64 {
        self.economy.as_ref().map(|e| e.inflation_multiplier).unwrap_or(1.0)
    }

    pub fn upgrade_cost(&self, key: &str) -> Option<CostMap> {
        upgrade_cost(key, self.level(key), self.inflation_multiplier())
    }

    pub fn rates(&self) -> BTreeMap<ResourceKind, f64> {
        effective_rates(&self.generation_rates, &self.upgrades)
    }

    pub fn is_currency_unlocked(&self, kind: ResourceKind) -> bool {
        kind == ResourceKind::Gooncoins
            || self.story.unlocked_currencies.iter().any(|c| c == kind.key())
    }

    pub fn is_building_unlocked(&self, id: &str, def: &BuildingDef) -> bool {
        id == "workshop" || def.always_available || self.story.unlocked_buildings.iter().any(|b| b == id)
    }

    pub fn building_level(&self, id: &str) -> u32 {
        self.buildings.get(id).copied().unwrap_or(0)
    }

    pub fn is_quest_completed(&self, id: &str) -> bool {
        self.story.completed_quests.iter().any(|q| q == id)
    }

    pub fn total_equipment(&self) -> u32 {
        self.equipment_counts.values().sum()
    }

    fn set_economy(&mut self, economy: Economy) {
        let previous = self.economy.as_ref().map(|e| e.inflation_rate).unwrap_or(economy.inflation_rate);
        self.inflation_trend = Trend::between(previous, economy.inflation_rate);
        self.economy = Some(economy);
    }
}

pub enum GameAction {
    Loaded(GameStateResponse),
    Clicked(ClickResponse),
    Generated(AutoGenerateResponse),
    UpgradeBought { key: String, response: BuyUpgradeResponse },
    Crafted(CraftResponse),
    Built { id: String, response: BuildResponse },
    QuestCompleted { id: String, response: QuestResponse },
    Traded(MarketResponse),
    EconomyRefreshed(Economy),
    CombatRefreshed(CombatOverview),
    BattleResolved(BattleResponse),
    TempleRefreshed(TempleSnapshot),
    RitualPerformed(RitualResponse),
    CaseOpened(CaseOpenResponse),
    InventoryRefreshed(Inventory),
    ItemSold(SellResponse),
    /// Deducts a cost ahead of the server round-trip; the next response
    /// overwrites the balances either way.
    OptimisticSpend(CostMap),
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        match action {
            Loaded(data) => {
                new.loaded = true;
                data.resources.apply_to(&mut new.resources);
                new.total_clicks = data.total_clicks;
                new.upgrades = data.upgrades;
                new.story = data.story;
                new.equipment = data.equipment;
                new.equipment_counts = data.equipment_counts;
                new.buildings = data.buildings;
                new.generation_rates = data.generation_rates;
                if let Some(economy) = data.economy {
                    new.set_economy(economy);
                }
                if let Some(rare) = data.rare_materials {
                    new.rare_materials = rare;
                }
                if let Some(combat) = data.combat {
                    new.combat = combat;
                }
                if let Some(temple) = data.temple {
                    new.temple = Some(temple);
                }
                if let Some(inventory) = data.inventory {
                    new.inventory = Some(inventory);
                }
                new.click_value = click_value(&new.upgrades);
            }
            Clicked(res) => {
                new.resources.gooncoins = res.gooncoins;
                new.total_clicks = res.total_clicks;
                new.click_value = res.click_value.unwrap_or_else(|| click_value(&new.upgrades));
            }
            Generated(res) => {
                res.resources.apply_to(&mut new.resources);
                if let Some(rates) = res.generation_rates {
                    new.generation_rates = rates;
                }
            }
            UpgradeBought { key, response } => {
                response.resources.apply_to(&mut new.resources);
                let level = response.new_level.unwrap_or_else(|| new.level(&key) + 1);
                new.upgrades.insert(key, level);
                new.click_value = click_value(&new.upgrades);
            }
            Crafted(res) => {
                res.resources.apply_to(&mut new.resources);
                if let Some(counts) = res.equipment_counts {
                    new.equipment_counts = counts;
                }
                if let Some(equipment) = res.equipment {
                    new.equipment = equipment;
                }
                if let Some(inventory) = res.inventory {
                    new.inventory = Some(inventory);
                }
            }
            Built { id, response } => {
                response.resources.apply_to(&mut new.resources);
                let level = new.buildings.entry(id).or_insert(0);
                *level = (*level).max(1);
            }
            QuestCompleted { id, response } => {
                response.resources.apply_to(&mut new.resources);
                if !new.is_quest_completed(&id) {
                    new.story.completed_quests.push(id);
                }
                if let Some(currencies) = response.unlocked_currencies {
                    new.story.unlocked_currencies = currencies;
                }
                if let Some(buildings) = response.unlocked_buildings {
                    new.story.unlocked_buildings = buildings;
                }
                if let Some(chapter) = response.current_chapter {
                    new.story.current_chapter = chapter;
                }
            }
            Traded(res) => {
                res.resources.apply_to(&mut new.resources);
                if let Some(economy) = res.economy {
                    new.set_economy(economy);
                }
            }
            EconomyRefreshed(economy) => new.set_economy(economy),
            CombatRefreshed(overview) => {
                new.rare_materials = overview.rare_materials.clone();
                new.combat = overview.profile.clone();
                new.combat_overview = Some(overview);
            }
            BattleResolved(res) => {
                if let Some(coins) = res.gooncoins {
                    new.resources.gooncoins = coins;
                }
                if let Some(rare) = res.rare_materials {
                    new.rare_materials = rare;
                }
                if let Some(temple) = res.temple {
                    new.temple = Some(temple);
                }
            }
            TempleRefreshed(temple) => new.temple = Some(temple),
            RitualPerformed(res) => {
                res.resources.apply_to(&mut new.resources);
                if let Some(temple) = res.temple {
                    new.temple = Some(temple);
                }
            }
            CaseOpened(res) => {
                res.resources.apply_to(&mut new.resources);
                if let Some(counts) = res.equipment_counts {
                    new.equipment_counts = counts;
                }
                if let Some(rare) = res.rare_materials {
                    new.rare_materials = rare;
                }
            }
            InventoryRefreshed(inventory) => new.inventory = Some(inventory),
            ItemSold(res) => {
                res.resources.apply_to(&mut new.resources);
                if let Some(counts) = res.equipment_counts {
                    new.equipment_counts = counts;
                }
                if let Some(equipment) = res.equipment {
                    new.equipment = equipment;
                }
                if let Some(inventory) = res.inventory {
                    new.inventory = Some(inventory);
                }
            }
            OptimisticSpend(cost) => {
                if !new.resources.spend(&cost) {
                    return self;
                }
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(pairs: &[(&str, f64)]) -> CostMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn reduce(state: GameState, action: GameAction) -> GameState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn decodes_game_state_with_uzene_key() {
        let raw = r#"{
            "gooncoins": 120.5, "astma": 3, "uzené": 7.25, "total_clicks": 42,
            "upgrades": {"click_power_1": 2, "auto_gooncoin": 1},
            "story": {"current_chapter": 2, "completed_quests": ["first_click"]},
            "buildings": {"workshop": 1},
            "generation_rates": {"gooncoins": 0.1},
            "economy": {"inflation_rate": 0.02, "inflation_multiplier": 1.1, "gooncoin_supply": 5000,
                        "market_multiplier": 1.1, "market_rates": {"astma": {"buy": 12.5, "sell": 11.0}}},
            "inventory": {"items": []}
        }"#;
        let data: GameStateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(data.resources.uzene, Some(7.25));
        assert_eq!(data.resources.poharky, None);
        assert_eq!(data.story.unlocked_currencies, vec!["gooncoins".to_string()]);
        assert_eq!(data.economy.as_ref().unwrap().market_rates["astma"].buy, 12.5);

        let state = reduce(GameState::default(), GameAction::Loaded(data));
        assert!(state.loaded);
        assert_eq!(state.resources.gooncoins, 120.5);
        assert_eq!(state.resources.uzene, 7.25);
        assert_eq!(state.click_value, 2.0);
        assert_eq!(state.inflation_multiplier(), 1.1);
    }

    #[test]
    fn load_keeps_sections_the_payload_omits() {
        let mut state = GameState::default();
        state.rare_materials.insert("obsidian".into(), 3.0);
        state.temple = Some(TempleSnapshot { favor: 9.0, unlocked: true, ..Default::default() });
        let state = reduce(state, GameAction::Loaded(GameStateResponse::default()));
        assert_eq!(state.rare_materials["obsidian"], 3.0);
        assert_eq!(state.temple.unwrap().favor, 9.0);
    }

    #[test]
    fn partial_payload_only_touches_named_balances() {
        let mut state = GameState::default();
        state.resources.astma = 4.0;
        state.resources.mrkev = 2.0;
        let res: BuildResponse = serde_json::from_str(r#"{"success": true, "gooncoins": 50, "astma": 1}"#).unwrap();
        let state = reduce(state, GameAction::Built { id: "market".into(), response: res });
        assert_eq!(state.resources.gooncoins, 50.0);
        assert_eq!(state.resources.astma, 1.0);
        assert_eq!(state.resources.mrkev, 2.0);
        assert_eq!(state.building_level("market"), 1);
    }

    #[test]
    fn upgrade_bought_updates_level_and_click_value() {
        let res: BuyUpgradeResponse = serde_json::from_str(
            r#"{"success": true, "new_level": 3, "gooncoins": 5, "astma": 1, "poharky": 0, "mrkev": 0, "uzené": 0}"#,
        )
        .unwrap();
        let state = reduce(
            GameState::default(),
            GameAction::UpgradeBought { key: "click_power_2".into(), response: res },
        );
        assert_eq!(state.level("click_power_2"), 3);
        assert_eq!(state.click_value, 2.5);
        assert_eq!(state.resources.gooncoins, 5.0);
    }

    #[test]
    fn optimistic_spend_is_all_or_nothing() {
        let mut state = GameState::default();
        state.resources.gooncoins = 100.0;
        state.resources.astma = 1.0;
        let unchanged = reduce(
            state.clone(),
            GameAction::OptimisticSpend(cost(&[("gooncoins", 50.0), ("astma", 5.0)])),
        );
        assert_eq!(unchanged.resources, state.resources);

        let spent = reduce(state, GameAction::OptimisticSpend(cost(&[("gooncoins", 40.0)])));
        assert_eq!(spent.resources.gooncoins, 60.0);
    }

    #[test]
    fn unknown_cost_keys_are_unaffordable() {
        let wallet = Resources { gooncoins: 1_000.0, ..Default::default() };
        assert!(wallet.can_afford(&cost(&[("gooncoins", 10.0)])));
        assert!(!wallet.can_afford(&cost(&[("logs", 1.0)])));
        assert!(wallet.can_afford(&cost(&[("logs", 0.0)])));
    }

    #[test]
    fn upgrade_cost_scales_and_inflates_coins_only() {
        let base = upgrade_cost("mrkev_collector", 0, 1.0).unwrap();
        assert_eq!(base, cost(&[("gooncoins", 100.0), ("astma", 10.0), ("poharky", 5.0)]));
        let scaled = upgrade_cost("mrkev_collector", 2, 2.0).unwrap();
        assert!((scaled["gooncoins"] - 100.0 * 2.25 * 2.0).abs() < 1e-9);
        assert!((scaled["astma"] - 22.5).abs() < 1e-9);
        assert!(upgrade_cost("nope", 0, 1.0).is_none());
    }

    #[test]
    fn server_rates_win_when_positive() {
        let mut upgrades = BTreeMap::new();
        upgrades.insert("auto_gooncoin".to_string(), 3);
        upgrades.insert("astma_collector".to_string(), 2);
        let mut server = BTreeMap::new();
        server.insert("gooncoins".to_string(), 0.0);
        server.insert("astma".to_string(), 0.5);
        let rates = effective_rates(&server, &upgrades);
        assert!((rates[&ResourceKind::Gooncoins] - 0.3).abs() < 1e-9);
        assert_eq!(rates[&ResourceKind::Astma], 0.5);
        assert_eq!(rates[&ResourceKind::Uzene], 0.0);
    }

    #[test]
    fn inflation_trend_tracks_changes() {
        let economy = |rate: f64| Economy { inflation_rate: rate, ..Default::default() };
        let state = reduce(GameState::default(), GameAction::EconomyRefreshed(economy(0.02)));
        assert_eq!(state.inflation_trend, Trend::Flat);
        let state = reduce(state, GameAction::EconomyRefreshed(economy(0.03)));
        assert_eq!(state.inflation_trend, Trend::Up);
        let state = reduce(state, GameAction::EconomyRefreshed(economy(0.0295)));
        assert_eq!(state.inflation_trend, Trend::Flat);
        let state = reduce(state, GameAction::EconomyRefreshed(economy(0.01)));
        assert_eq!(state.inflation_trend, Trend::Down);
    }

    #[test]
    fn quest_completion_records_unlocks_once() {
        let res: QuestResponse = serde_json::from_str(
            r#"{"success": true, "gooncoins": 60, "unlocked_currencies": ["gooncoins", "astma"], "current_chapter": 1}"#,
        )
        .unwrap();
        let state = reduce(
            GameState::default(),
            GameAction::QuestCompleted { id: "first_100".into(), response: res.clone() },
        );
        let state = reduce(state, GameAction::QuestCompleted { id: "first_100".into(), response: res });
        assert_eq!(state.story.completed_quests, vec!["first_100".to_string()]);
        assert!(state.is_currency_unlocked(ResourceKind::Astma));
        assert!(!state.is_currency_unlocked(ResourceKind::Mrkev));
    }

    #[test]
    fn battle_outcome_text() {
        let won: BattleResponse = serde_json::from_str(
            r#"{"success": true, "player_won": true, "rewards": {"gooncoins": 250, "rare_materials": {"obsidian": 1}}, "monster_name": "Rat King", "gooncoins": 900}"#,
        )
        .unwrap();
        assert_eq!(won.outcome_text(), "Victory over Rat King! +250.0 Gooncoins, +1.0 obsidian");
        let lost = BattleResponse { opponent: Some("vlasta".into()), ..Default::default() };
        assert_eq!(lost.outcome_text(), "Defeat against vlasta.");

        let state = reduce(GameState::default(), GameAction::BattleResolved(won));
        assert_eq!(state.resources.gooncoins, 900.0);
    }

    #[test]
    fn blessing_affordability_uses_temple_favor() {
        let temple = TempleSnapshot { favor: 10.0, unlocked: true, ..Default::default() };
        let blessing = Blessing {
            id: "iron".into(),
            name: "Iron Skin".into(),
            cost: cost(&[("favor", 8.0), ("gooncoins", 100.0)]),
            ..Default::default()
        };
        let rich = Resources { gooncoins: 100.0, ..Default::default() };
        assert!(temple.can_afford(&blessing, &rich));
        assert!(!temple.can_afford(&blessing, &Resources::default()));
    }

    #[test]
    fn blessing_bonus_lists_flat_stats_with_icons() {
        let blessing = Blessing {
            id: "war".into(),
            bonus: BTreeMap::from([
                ("attack".to_string(), 12.0),
                ("hp".to_string(), 40.0),
                ("speed".to_string(), 0.5),
                ("defense".to_string(), 0.0),
            ]),
            ..Default::default()
        };
        assert_eq!(blessing.bonus_text(), "⚔ +12, ❤️ +40, +0.50 speed");
        assert_eq!(Blessing::default().bonus_text(), "None");
    }

    #[test]
    fn ritual_needs_cooldown_and_a_different_blessing() {
        let blessing = Blessing { id: "iron".into(), cost: cost(&[("favor", 5.0)]), ..Default::default() };
        let mut temple = TempleSnapshot { favor: 10.0, unlocked: true, ..Default::default() };
        let wallet = Resources::default();
        assert!(temple.ritual_available(&blessing, &wallet, true));
        assert!(!temple.ritual_available(&blessing, &wallet, false));

        temple.active_blessing = Some(ActiveBlessing { id: "iron".into(), ..Default::default() });
        assert!(temple.is_active(&blessing));
        assert!(!temple.ritual_available(&blessing, &wallet, true));

        temple.active_blessing = Some(ActiveBlessing { id: "luck".into(), ..Default::default() });
        assert!(temple.ritual_available(&blessing, &wallet, true));
    }

    #[test]
    fn favor_cost_is_checked_against_the_temple() {
        let temple = TempleSnapshot { favor: 6.0, unlocked: true, ..Default::default() };
        let wallet = Resources { gooncoins: 50.0, ..Default::default() };
        assert!(temple.covers("favor", 6.0, &wallet));
        assert!(!temple.covers("favor", 7.0, &wallet));
        assert!(temple.covers("gooncoins", 50.0, &wallet));
        assert!(!wallet.can_afford(&cost(&[("favor", 1.0)])));
    }

    #[test]
    fn lore_unlocks_by_chapter_and_accepts_plain_body() {
        let story: StoryData = serde_json::from_str(
            r#"{"lore_entries": [
                {"id": "a", "title": "First Click", "body": ["one", "two"], "required_chapter": 1},
                {"id": "b", "title": "Fog", "body": "single", "required_chapter": 2},
                {"id": "c", "title": "Always"}
            ]}"#,
        )
        .unwrap();
        let ids = |ch| story.lore_for_chapter(ch).iter().map(|e| e.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids(1), vec!["a", "c"]);
        assert_eq!(ids(2), vec!["a", "b", "c"]);
        assert_eq!(story.lore_entries[0].paragraphs(), vec!["one", "two"]);
        assert_eq!(story.lore_entries[1].paragraphs(), vec!["single"]);
        assert_eq!(story.lore_entries[0].unlock_note(), None);
        assert_eq!(story.lore_entries[1].unlock_note().as_deref(), Some("Unlocked in chapter 2"));
    }

    fn inventory() -> Inventory {
        serde_json::from_str(
            r#"{
                "items": [
                    {"instance_id": 1, "equipment_id": "helma", "name": "Helma", "slot": "head", "rarity": "common",
                     "acquired_at": "2024-01-01T10:00:00", "acquisition_note": "Crafted", "market_value": 120, "sell_value": 96},
                    {"instance_id": 2, "equipment_id": "mec", "name": "Meč", "slot": "weapon", "rarity": "rare",
                     "acquired_at": "2024-03-01T10:00:00", "acquired_via": "case", "base_value": 300, "market_trend": "up"},
                    {"instance_id": 3, "equipment_id": "helma", "name": "Helma", "slot": "head", "rarity": "common",
                     "equipped": true, "acquired_at": "2024-02-01T10:00:00"}
                ],
                "summary": {"total_items": 3, "equipped_items": 1, "duplicates": 1, "estimated_sell_value": 250.5,
                            "rarity_breakdown": {"common": 2, "rare": 1}},
                "market": {
                    "helma": {"base_value": 100, "price_multiplier": 1.2, "market_value": 120, "sell_value": 96, "trend": "up", "current_supply": 4},
                    "mec": {"base_value": 300, "price_multiplier": 0.8, "market_value": 240, "sell_value": 192, "trend": "down"},
                    "stit": {"base_value": 50}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn inventory_filters_newest_first() {
        let inv = inventory();
        let ids = |items: Vec<&InventoryItem>| items.iter().map(|i| i.instance_id).collect::<Vec<_>>();
        assert_eq!(ids(inv.filtered(None, "")), vec![2, 3, 1]);
        assert_eq!(ids(inv.filtered(Some("common"), "")), vec![3, 1]);
        assert_eq!(ids(inv.filtered(None, " CASE ")), vec![2]);
        assert_eq!(ids(inv.filtered(None, "crafted")), vec![1]);
        assert!(inv.filtered(Some("legendary"), "").is_empty());
    }

    #[test]
    fn inventory_prices_fall_back_and_market_trends_rank() {
        let inv = inventory();
        let mec = &inv.items[1];
        assert_eq!(mec.value(), 300.0);
        assert_eq!(mec.sell_price(), 300.0);
        assert_eq!(mec.trend(), Trend::Up);
        assert_eq!(inv.items[0].sell_price(), 96.0);

        let trending = inv.trending(2);
        assert_eq!(trending.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec!["helma", "stit"]);
        assert_eq!(inv.market["stit"].price_multiplier, 1.0);
        assert_eq!(inv.market["helma"].current_supply, Some(4));
    }

    #[test]
    fn selling_updates_balances_and_inventory() {
        let mut state = GameState::default();
        state.inventory = Some(inventory());
        let sold: SellResponse = serde_json::from_str(
            r#"{"success": true, "message": "Sold for 96.00", "gooncoins": 596,
                "equipment_counts": {"helma": 1, "mec": 1}, "equipment": {"head": "helma"},
                "inventory": {"items": [], "summary": {"total_items": 2}}}"#,
        )
        .unwrap();
        let state = reduce(state, GameAction::ItemSold(sold));
        assert_eq!(state.resources.gooncoins, 596.0);
        assert_eq!(state.equipment_counts["helma"], 1);
        assert_eq!(state.equipment["head"], "helma");
        assert_eq!(state.inventory.unwrap().summary.total_items, 2);
    }

    #[test]
    fn game_state_carries_inventory() {
        let data: GameStateResponse =
            serde_json::from_str(r#"{"gooncoins": 1, "inventory": {"summary": {"total_items": 5}}}"#).unwrap();
        let state = reduce(GameState::default(), GameAction::Loaded(data));
        assert_eq!(state.inventory.map(|i| i.summary.total_items), Some(5));
    }

    #[test]
    fn player_equipment_decodes_slots() {
        let viewed: PlayerEquipment = serde_json::from_str(
            r#"{"username": "vlasta", "equipment": [{"slot": "head", "id": "helma"}]}"#,
        )
        .unwrap();
        assert_eq!(viewed.equipment[0], EquippedSlot { slot: "head".into(), id: "helma".into() });
    }

    #[test]
    fn case_odds_are_weight_shares() {
        let case: CaseDef = serde_json::from_str(
            r#"{"id": "panelak_basic", "name": "Panel Case", "price": 750, "currency": "gooncoins",
                "items": [{"id": "a", "type": "currency", "name": "A", "weight": 30, "payout": {"resources": {"gooncoins": 450}}},
                          {"id": "b", "type": "equipment", "name": "B", "weight": 10}]}"#,
        )
        .unwrap();
        let odds = case.odds();
        assert_eq!(odds[0].1, 75.0);
        assert_eq!(odds[1].0.kind, "equipment");
    }

    #[test]
    fn monster_status_parsing() {
        assert!(MonsterStatus::from_wire("next").can_fight());
        assert!(MonsterStatus::from_wire("repeatable").can_fight());
        assert!(!MonsterStatus::from_wire("defeated").can_fight());
        assert_eq!(MonsterStatus::from_wire("weird"), MonsterStatus::Locked);
    }
}
