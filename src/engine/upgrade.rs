use super::config::{Cost, Effect, UpgradeDef, UpgradeTarget, UpgradeUnlock};
use super::resource::Resource;
use super::save::UpgradeSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub name: String,
    pub description: String,
    pub cost: Cost,
    pub target: UpgradeTarget,
    pub effect: Effect,
    pub unlock: Option<UpgradeUnlock>,
    pub purchased: bool,
}

impl Upgrade {
    pub fn from_def(def: &UpgradeDef) -> Self {
        Self {
            name: def.name.clone(),
            description: def.description.clone(),
            cost: def.cost.clone(),
            target: def.target.clone(),
            effect: def.effect(),
            unlock: def.unlock_requirement.clone(),
            purchased: false,
        }
    }

    pub fn is_affordable(&self, resources: &[Resource]) -> bool {
        resources
            .iter()
            .find(|r| r.name == self.cost.resource)
            .is_some_and(|r| r.amount >= self.cost.amount)
    }

    /// Purchased upgrades stay listed; locked ones appear once either gate opens.
    pub fn is_visible(&self, resources: &[Resource], total_generated: f64) -> bool {
        if self.purchased {
            return true;
        }
        let Some(req) = &self.unlock else {
            return true;
        };
        if req.total_generated.is_some_and(|t| total_generated >= t) {
            return true;
        }
        if let Some(gate) = &req.resource {
            return resources
                .iter()
                .any(|r| r.name == gate.name && r.generated >= gate.generated);
        }
        false
    }

    pub fn reset(&mut self) {
        self.purchased = false;
    }

    pub fn snapshot(&self) -> UpgradeSnapshot {
        UpgradeSnapshot {
            name: self.name.clone(),
            purchased: Some(self.purchased),
        }
    }

    pub fn hydrate(&mut self, snap: &UpgradeSnapshot) {
        self.purchased = snap.purchased.unwrap_or(self.purchased);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{AGRO, EngineConfig};

    #[test]
    fn gated_upgrade_appears_after_resource_output() {
        let cfg = EngineConfig::default();
        let mut resources: Vec<Resource> = cfg.resources.iter().map(Resource::from_def).collect();
        let compost = Upgrade::from_def(&cfg.upgrades[1]);
        assert!(!compost.is_visible(&resources, 0.0));
        let agro = resources.iter_mut().find(|r| r.name == AGRO).unwrap();
        agro.add(100.0);
        assert!(compost.is_visible(&resources, 0.0));
    }

    #[test]
    fn total_gate_and_purchased_flag() {
        let cfg = EngineConfig::default();
        let resources: Vec<Resource> = cfg.resources.iter().map(Resource::from_def).collect();
        let mut radio = Upgrade::from_def(&cfg.upgrades[2]);
        assert!(!radio.is_visible(&resources, 1499.0));
        assert!(radio.is_visible(&resources, 1500.0));
        radio.purchased = true;
        assert!(radio.is_visible(&resources, 0.0));
    }
}
