use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{CostMap, EquipmentDef, Resources, StoryData};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
    Unique,
}

impl Rarity {
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("common") {
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            "unique" => Rarity::Unique,
            _ => Rarity::Common,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Unique => "Unique",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Rarity::Common => "rarity-common",
            Rarity::Rare => "rarity-rare",
            Rarity::Epic => "rarity-epic",
            Rarity::Legendary => "rarity-legendary",
            Rarity::Unique => "rarity-unique",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Requirement {
    pub id: String,
    pub name: String,
    pub needed: u32,
    pub owned: u32,
    pub met: bool,
    pub ratio: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnlockState {
    pub is_unlocked: bool,
    /// Smallest requirement ratio, 1 when nothing is required.
    pub progress: f64,
    pub requirements: Vec<Requirement>,
}

pub fn unlock_state(def: &EquipmentDef, counts: &BTreeMap<String, u32>, story: &StoryData) -> UnlockState {
    let requirements: Vec<Requirement> = def
        .unlock_requirement
        .iter()
        .flatten()
        .map(|(id, needed)| {
            let owned = counts.get(id).copied().unwrap_or(0);
            let ratio = if *needed == 0 { 1.0 } else { (owned as f64 / *needed as f64).min(1.0) };
            Requirement {
                id: id.clone(),
                name: story.equipment_name(id).to_string(),
                needed: *needed,
                owned,
                met: owned >= *needed,
                ratio,
            }
        })
        .collect();
    let progress = requirements.iter().map(|r| r.ratio).fold(1.0, f64::min);
    UnlockState {
        is_unlocked: requirements.iter().all(|r| r.met),
        progress,
        requirements,
    }
}

/// Explicit power when the server provides one, otherwise the bonus sum.
pub fn item_power(def: &EquipmentDef) -> f64 {
    def.power.unwrap_or_else(|| def.bonus.values().sum())
}

pub fn can_afford_craft(resources: &Resources, cost: &CostMap) -> bool {
    resources.can_afford(cost)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CraftSort {
    #[default]
    Unlocked,
    Rarity,
    Power,
    Newest,
    Name,
}

impl CraftSort {
    pub const ALL: [CraftSort; 5] = [
        CraftSort::Unlocked,
        CraftSort::Rarity,
        CraftSort::Power,
        CraftSort::Newest,
        CraftSort::Name,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CraftSort::Unlocked => "unlocked",
            CraftSort::Rarity => "rarity",
            CraftSort::Power => "power",
            CraftSort::Newest => "newest",
            CraftSort::Name => "name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CraftSort::Unlocked => "Available first",
            CraftSort::Rarity => "Rarity",
            CraftSort::Power => "Power",
            CraftSort::Newest => "Newest",
            CraftSort::Name => "Name",
        }
    }

    /// Unknown stored values fall back to the default order.
    pub fn from_key(key: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.key() == key).unwrap_or_default()
    }
}

/// One row of the crafting list with its sort keys precomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct CraftItem {
    pub id: String,
    pub def: EquipmentDef,
    pub rarity: Rarity,
    pub power: f64,
    pub release: f64,
    pub unlock: UnlockState,
}

impl CraftItem {
    pub fn new(id: &str, def: &EquipmentDef, counts: &BTreeMap<String, u32>, story: &StoryData) -> Self {
        Self {
            id: id.to_string(),
            rarity: Rarity::parse(def.rarity.as_deref()),
            power: item_power(def),
            release: def.release_order.unwrap_or(0.0),
            unlock: unlock_state(def, counts, story),
            def: def.clone(),
        }
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Czech alphabet order: č, ř, š and ž are letters of their own after the
/// base letter, other accents only break ties.
fn letter_weight(c: char) -> ((char, u8), u8) {
    match c {
        'á' => (('a', 0), 1),
        'é' => (('e', 0), 1),
        'ě' => (('e', 0), 2),
        'í' => (('i', 0), 1),
        'ó' => (('o', 0), 1),
        'ú' => (('u', 0), 1),
        'ů' => (('u', 0), 2),
        'ý' => (('y', 0), 1),
        'ď' => (('d', 0), 1),
        'ť' => (('t', 0), 1),
        'ň' => (('n', 0), 1),
        'č' => (('c', 1), 0),
        'ř' => (('r', 1), 0),
        'š' => (('s', 1), 0),
        'ž' => (('z', 1), 0),
        other => ((other, 0), 0),
    }
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    let weights = |s: &str| s.chars().map(letter_weight).collect::<Vec<_>>();
    let (wa, wb) = (weights(&a), weights(&b));
    let primary = |w: &[((char, u8), u8)]| w.iter().map(|(p, _)| *p).collect::<Vec<_>>();
    let accents = |w: &[((char, u8), u8)]| w.iter().map(|(_, s)| *s).collect::<Vec<_>>();
    primary(&wa)
        .cmp(&primary(&wb))
        .then_with(|| accents(&wa).cmp(&accents(&wb)))
        .then_with(|| a.cmp(&b))
}

fn by_name(a: &CraftItem, b: &CraftItem) -> Ordering {
    compare_names(&a.def.name, &b.def.name)
}

pub fn compare_craft_items(a: &CraftItem, b: &CraftItem, mode: CraftSort) -> Ordering {
    let primary = match mode {
        CraftSort::Rarity => b.rarity.cmp(&a.rarity),
        CraftSort::Power => desc(a.power, b.power),
        CraftSort::Newest => desc(a.release, b.release),
        CraftSort::Name => return by_name(a, b),
        CraftSort::Unlocked => b.unlock.is_unlocked.cmp(&a.unlock.is_unlocked),
    };
    primary
        .then_with(|| b.rarity.cmp(&a.rarity))
        .then_with(|| desc(a.power, b.power))
        .then_with(|| desc(a.release, b.release))
        .then_with(|| by_name(a, b))
}

pub fn sort_craft_items(items: &mut [CraftItem], mode: CraftSort) {
    items.sort_by(|a, b| compare_craft_items(a, b, mode));
}

/// Builds the sorted crafting list from the story definitions.
pub fn craft_list(story: &StoryData, counts: &BTreeMap<String, u32>, mode: CraftSort) -> Vec<CraftItem> {
    let mut items: Vec<CraftItem> = story
        .equipment
        .iter()
        .map(|(id, def)| CraftItem::new(id, def, counts, story))
        .collect();
    sort_craft_items(&mut items, mode);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, rarity: &str, power: Option<f64>, release: f64) -> EquipmentDef {
        EquipmentDef {
            name: name.to_string(),
            rarity: Some(rarity.to_string()),
            power,
            release_order: Some(release),
            ..Default::default()
        }
    }

    fn story(defs: &[(&str, EquipmentDef)]) -> StoryData {
        StoryData {
            equipment: defs.iter().map(|(id, d)| (id.to_string(), d.clone())).collect(),
            ..Default::default()
        }
    }

    fn ids(items: &[CraftItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn rarity_parsing_falls_back_to_common() {
        assert_eq!(Rarity::parse(Some("legendary")), Rarity::Legendary);
        assert_eq!(Rarity::parse(Some("mythic")), Rarity::Common);
        assert_eq!(Rarity::parse(None), Rarity::Common);
        assert!(Rarity::Unique > Rarity::Epic);
    }

    #[test]
    fn power_prefers_explicit_value() {
        let mut d = def("Katana", "rare", None, 0.0);
        d.bonus.insert("attack".into(), 4.0);
        d.bonus.insert("luck".into(), 1.5);
        assert_eq!(item_power(&d), 5.5);
        d.power = Some(12.0);
        assert_eq!(item_power(&d), 12.0);
    }

    #[test]
    fn unlock_progress_is_minimum_ratio() {
        let mut d = def("Mega Katana", "epic", None, 0.0);
        let mut req = BTreeMap::new();
        req.insert("katana".to_string(), 4);
        req.insert("helmet".to_string(), 2);
        d.unlock_requirement = Some(req);
        let s = story(&[("katana", def("Rusty Katana", "common", None, 0.0))]);

        let mut counts = BTreeMap::new();
        counts.insert("katana".to_string(), 2);
        counts.insert("helmet".to_string(), 2);
        let state = unlock_state(&d, &counts, &s);
        assert!(!state.is_unlocked);
        assert_eq!(state.progress, 0.5);
        assert_eq!(state.requirements.iter().find(|r| r.id == "katana").unwrap().name, "Rusty Katana");

        counts.insert("katana".to_string(), 9);
        let state = unlock_state(&d, &counts, &s);
        assert!(state.is_unlocked);
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn no_requirements_means_unlocked() {
        let state = unlock_state(&def("Stick", "common", None, 0.0), &BTreeMap::new(), &StoryData::default());
        assert!(state.is_unlocked);
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn sort_modes_and_tie_breaks() {
        let mut locked = def("Zeta Blade", "legendary", Some(50.0), 3.0);
        let mut req = BTreeMap::new();
        req.insert("stick".to_string(), 1);
        locked.unlock_requirement = Some(req);
        let s = story(&[
            ("stick", def("Stick", "common", Some(1.0), 1.0)),
            ("zeta", locked),
            ("axe", def("Axe", "rare", Some(10.0), 5.0)),
            ("bow", def("Bow", "rare", Some(10.0), 2.0)),
        ]);
        let counts = BTreeMap::new();

        assert_eq!(ids(&craft_list(&s, &counts, CraftSort::Unlocked)), ["axe", "bow", "stick", "zeta"]);
        assert_eq!(ids(&craft_list(&s, &counts, CraftSort::Rarity)), ["zeta", "axe", "bow", "stick"]);
        assert_eq!(ids(&craft_list(&s, &counts, CraftSort::Power)), ["zeta", "axe", "bow", "stick"]);
        assert_eq!(ids(&craft_list(&s, &counts, CraftSort::Newest)), ["axe", "zeta", "bow", "stick"]);
        assert_eq!(ids(&craft_list(&s, &counts, CraftSort::Name)), ["axe", "bow", "stick", "zeta"]);
    }

    #[test]
    fn sort_key_round_trips_and_defaults() {
        assert_eq!(CraftSort::from_key("power"), CraftSort::Power);
        assert_eq!(CraftSort::from_key(""), CraftSort::Unlocked);
    }

    #[test]
    fn names_follow_czech_alphabet() {
        assert_eq!(compare_names("Čepice", "Dres"), Ordering::Less);
        assert_eq!(compare_names("Cylindr", "Čepice"), Ordering::Less);
        assert_eq!(compare_names("Ábel", "Adam"), Ordering::Less);
        assert_eq!(compare_names("Žezlo", "zvon"), Ordering::Greater);
        assert_eq!(compare_names("Dres", "dres"), Ordering::Equal);

        let story = story(&[
            ("d", def("Dres", "common", Some(1.0), 1.0)),
            ("c", def("Čepice", "common", Some(1.0), 2.0)),
            ("z", def("Zvon", "common", Some(1.0), 3.0)),
        ]);
        let items = craft_list(&story, &BTreeMap::new(), CraftSort::Name);
        assert_eq!(ids(&items), vec!["c", "d", "z"]);
    }
}
