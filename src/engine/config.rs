use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub resource: String,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDef {
    pub name: String,
    #[serde(default)]
    pub base_production: f64,
    #[serde(default = "one")]
    pub multiplier: f64,
}

/// Gate on a worker: either a resource has produced `amount` in this run,
/// or the run's total output reached `total_generated`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerUnlock {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub total_generated: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: Cost,
    pub base_production: f64,
    #[serde(default = "default_cost_scaling")]
    pub cost_scaling: f64,
    #[serde(default)]
    pub amount_owned: u32,
    #[serde(default = "one")]
    pub multiplier: f64,
    pub produces: String,
    #[serde(default)]
    pub unlock_requirement: Option<WorkerUnlock>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeTarget {
    Resource { name: String },
    AllResources,
    Worker { name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Multiply,
    Add,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Multiply(f64),
    Add(f64),
}

impl Effect {
    pub fn apply_to(self, multiplier: &mut f64) {
        match self {
            Effect::Multiply(v) => *multiplier *= v,
            Effect::Add(v) => *multiplier += v,
        }
    }

    pub fn label(self) -> String {
        match self {
            Effect::Multiply(v) => format!("×{}", v),
            Effect::Add(v) => format!("+{}", v),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceGate {
    pub name: String,
    #[serde(default)]
    pub generated: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeUnlock {
    #[serde(default)]
    pub total_generated: Option<f64>,
    #[serde(default)]
    pub resource: Option<ResourceGate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: Cost,
    pub target: UpgradeTarget,
    pub effect_type: EffectKind,
    pub effect_value: f64,
    #[serde(default)]
    pub unlock_requirement: Option<UpgradeUnlock>,
}

impl UpgradeDef {
    pub fn effect(&self) -> Effect {
        match self.effect_type {
            EffectKind::Multiply => Effect::Multiply(self.effect_value),
            EffectKind::Add => Effect::Add(self.effect_value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub primary_resource: String,
    pub manual_click_base: f64,
    pub prestige_power_per_point: f64,
    pub resources: Vec<ResourceDef>,
    pub workers: Vec<WorkerDef>,
    pub upgrades: Vec<UpgradeDef>,
}

fn one() -> f64 {
    1.0
}

fn default_cost_scaling() -> f64 {
    1.15
}

pub const WILL: &str = "Kolektivní Vůle";
pub const AGRO: &str = "Agro Poukázky";
pub const CREDITS: &str = "Průmyslové Kredity";

impl Default for EngineConfig {
    fn default() -> Self {
        let cost = |resource: &str, amount: f64| Cost {
            resource: resource.to_string(),
            amount,
        };
        Self {
            primary_resource: WILL.to_string(),
            manual_click_base: 1.0,
            prestige_power_per_point: 0.08,
            resources: vec![
                ResourceDef { name: WILL.into(), base_production: 0.0, multiplier: 1.0 },
                ResourceDef { name: AGRO.into(), base_production: 0.0, multiplier: 1.2 },
                ResourceDef { name: CREDITS.into(), base_production: 0.0, multiplier: 1.0 },
            ],
            workers: vec![
                WorkerDef {
                    name: "Uliční agitátor".into(),
                    description: "Collects signatures and raises the base output of ideology.".into(),
                    cost: cost(WILL, 10.0),
                    base_production: 0.5,
                    cost_scaling: 1.15,
                    amount_owned: 0,
                    multiplier: 1.0,
                    produces: WILL.into(),
                    unlock_requirement: None,
                },
                WorkerDef {
                    name: "Agrární kooperátor".into(),
                    description: "Automates the allotments and unlocks agro vouchers.".into(),
                    cost: cost(WILL, 60.0),
                    base_production: 0.8,
                    cost_scaling: 1.17,
                    amount_owned: 0,
                    multiplier: 1.0,
                    produces: AGRO.into(),
                    unlock_requirement: Some(WorkerUnlock {
                        resource: Some(WILL.into()),
                        amount: Some(50.0),
                        total_generated: None,
                    }),
                },
                WorkerDef {
                    name: "Panelový inženýr".into(),
                    description: "Recalculates the plumbing and mints industrial credits.".into(),
                    cost: cost(AGRO, 120.0),
                    base_production: 1.5,
                    cost_scaling: 1.2,
                    amount_owned: 0,
                    multiplier: 1.0,
                    produces: CREDITS.into(),
                    unlock_requirement: Some(WorkerUnlock {
                        resource: None,
                        amount: None,
                        total_generated: Some(500.0),
                    }),
                },
            ],
            upgrades: vec![
                UpgradeDef {
                    name: "Duplikát letáků".into(),
                    description: "Doubles the Kolektivní Vůle multiplier.".into(),
                    cost: cost(WILL, 80.0),
                    target: UpgradeTarget::Resource { name: WILL.into() },
                    effect_type: EffectKind::Multiply,
                    effect_value: 2.0,
                    unlock_requirement: None,
                },
                UpgradeDef {
                    name: "Kompostové pásy".into(),
                    description: "Each Agrární kooperátor produces 50% more.".into(),
                    cost: cost(AGRO, 150.0),
                    target: UpgradeTarget::Worker { name: "Agrární kooperátor".into() },
                    effect_type: EffectKind::Multiply,
                    effect_value: 1.5,
                    unlock_requirement: Some(UpgradeUnlock {
                        total_generated: None,
                        resource: Some(ResourceGate { name: AGRO.into(), generated: 100.0 }),
                    }),
                },
                UpgradeDef {
                    name: "Tovární rozhlas".into(),
                    description: "Every resource gains +0.25 multiplier.".into(),
                    cost: cost(CREDITS, 200.0),
                    target: UpgradeTarget::AllResources,
                    effect_type: EffectKind::Add,
                    effect_value: 0.25,
                    unlock_requirement: Some(UpgradeUnlock {
                        total_generated: Some(1500.0),
                        resource: None,
                    }),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_def_reads_effect_fields() {
        let raw = r#"{
            "name": "Compost",
            "cost": {"resource": "Agro", "amount": 150},
            "target": {"type": "worker", "name": "Coop"},
            "effectType": "multiply",
            "effectValue": 1.5
        }"#;
        let def: UpgradeDef = serde_json::from_str(raw).unwrap();
        assert_eq!(def.effect(), Effect::Multiply(1.5));
        assert_eq!(def.target, UpgradeTarget::Worker { name: "Coop".into() });
        assert!(def.unlock_requirement.is_none());
    }

    #[test]
    fn worker_def_defaults_scaling() {
        let raw = r#"{
            "name": "W",
            "cost": {"resource": "R", "amount": 10},
            "baseProduction": 0.5,
            "produces": "R"
        }"#;
        let def: WorkerDef = serde_json::from_str(raw).unwrap();
        assert_eq!(def.cost_scaling, 1.15);
        assert_eq!(def.multiplier, 1.0);
    }

    #[test]
    fn effect_labels() {
        assert_eq!(Effect::Multiply(2.0).label(), "×2");
        assert_eq!(Effect::Add(0.25).label(), "+0.25");
    }
}
