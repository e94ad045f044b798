//! Static client-side content: upgrade blueprints and resource metadata.

use crate::model::ResourceKind::{self, *};

pub struct UpgradeInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub base_cost: &'static [(ResourceKind, f64)],
}

pub struct GeneratorInfo {
    pub upgrade_key: &'static str,
    pub produces: ResourceKind,
    /// Units per second added by each level.
    pub rate_per_level: f64,
}

pub const CLICK_UPGRADES: [&str; 2] = ["click_power_1", "click_power_2"];

pub const UPGRADES: [UpgradeInfo; 7] = [
    UpgradeInfo {
        key: "click_power_1",
        name: "Click Power I",
        description: "+0.5 Gooncoins per click",
        icon: "⚡",
        base_cost: &[(Gooncoins, 10.0)],
    },
    UpgradeInfo {
        key: "click_power_2",
        name: "Click Power II",
        description: "Another +0.5 Gooncoins per click",
        icon: "⚡",
        base_cost: &[(Gooncoins, 50.0), (Astma, 5.0)],
    },
    UpgradeInfo {
        key: "auto_gooncoin",
        name: "Gooncoin Auto-generator",
        description: "Mints Gooncoins while you are away from the button",
        icon: "💰",
        base_cost: &[(Gooncoins, 100.0), (Astma, 10.0)],
    },
    UpgradeInfo {
        key: "astma_collector",
        name: "Astma Collector",
        description: "Bottles the stairwell air",
        icon: "💨",
        base_cost: &[(Gooncoins, 50.0)],
    },
    UpgradeInfo {
        key: "poharky_collector",
        name: "Pohárky Collector",
        description: "Collects cups from every balcony",
        icon: "🥃",
        base_cost: &[(Gooncoins, 75.0), (Astma, 5.0)],
    },
    UpgradeInfo {
        key: "mrkev_collector",
        name: "Mrkev Collector",
        description: "Harvests the allotment gardens",
        icon: "🥕",
        base_cost: &[(Gooncoins, 100.0), (Astma, 10.0), (Poharky, 5.0)],
    },
    UpgradeInfo {
        key: "uzené_collector",
        name: "Uzené Collector",
        description: "Keeps the smokehouse running",
        icon: "🍖",
        base_cost: &[
            (Gooncoins, 150.0),
            (Astma, 15.0),
            (Poharky, 10.0),
            (Mrkev, 5.0),
        ],
    },
];

pub const GENERATORS: [GeneratorInfo; 5] = [
    GeneratorInfo { upgrade_key: "auto_gooncoin", produces: Gooncoins, rate_per_level: 0.1 },
    GeneratorInfo { upgrade_key: "astma_collector", produces: Astma, rate_per_level: 0.05 },
    GeneratorInfo { upgrade_key: "poharky_collector", produces: Poharky, rate_per_level: 0.03 },
    GeneratorInfo { upgrade_key: "mrkev_collector", produces: Mrkev, rate_per_level: 0.02 },
    GeneratorInfo { upgrade_key: "uzené_collector", produces: Uzene, rate_per_level: 0.01 },
];

pub fn upgrade(key: &str) -> Option<&'static UpgradeInfo> {
    UPGRADES.iter().find(|u| u.key == key)
}

pub fn is_generator(key: &str) -> bool {
    GENERATORS.iter().any(|g| g.upgrade_key == key)
}

/// Icon for a currency or rare-material key, with a neutral fallback.
pub fn currency_icon(key: &str) -> &'static str {
    match ResourceKind::from_key(key) {
        Some(kind) => kind.icon(),
        None if key == "favor" => "🔱",
        None => "•",
    }
}

/// Display name for a currency key; unknown keys are shown as-is.
pub fn currency_label(key: &str) -> String {
    match ResourceKind::from_key(key) {
        Some(kind) => kind.label().to_string(),
        None if key == "favor" => "Temple favor".to_string(),
        None => key.to_string(),
    }
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Gooncoins => "Gooncoins",
            Astma => "Astma",
            Poharky => "Pohárky",
            Mrkev => "Mrkev",
            Uzene => "Uzené",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Gooncoins => "💰",
            Astma => "💨",
            Poharky => "🥃",
            Mrkev => "🥕",
            Uzene => "🍖",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_generator_has_an_upgrade() {
        for generator in &GENERATORS {
            assert!(upgrade(generator.upgrade_key).is_some(), "{}", generator.upgrade_key);
        }
        assert!(!is_generator("click_power_1"));
        assert!(is_generator("uzené_collector"));
    }

    #[test]
    fn currency_fallbacks() {
        assert_eq!(currency_label("poharky"), "Pohárky");
        assert_eq!(currency_label("favor"), "Temple favor");
        assert_eq!(currency_label("obsidian"), "obsidian");
        assert_eq!(currency_icon("uzené"), "🍖");
    }
}
