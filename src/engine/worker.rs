use super::config::{WorkerDef, WorkerUnlock};
use super::resource::Resource;
use super::save::WorkerSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub struct Worker {
    pub name: String,
    pub description: String,
    pub base_cost: f64,
    pub cost_resource: String,
    pub base_production: f64,
    pub cost_scaling: f64,
    pub owned: u32,
    pub multiplier: f64,
    pub produces: String,
    pub unlock: Option<WorkerUnlock>,
}

impl Worker {
    pub fn from_def(def: &WorkerDef) -> Self {
        Self {
            name: def.name.clone(),
            description: def.description.clone(),
            base_cost: def.cost.amount,
            cost_resource: def.cost.resource.clone(),
            base_production: def.base_production,
            cost_scaling: def.cost_scaling,
            owned: def.amount_owned,
            multiplier: def.multiplier,
            produces: def.produces.clone(),
            unlock: def.unlock_requirement.clone(),
        }
    }

    pub fn current_cost(&self) -> f64 {
        self.base_cost * self.cost_scaling.powf(f64::from(self.owned))
    }

    pub fn is_unlocked(&self, resources: &[Resource], total_generated: f64) -> bool {
        let Some(req) = &self.unlock else {
            return true;
        };
        if let (Some(name), Some(amount)) = (&req.resource, req.amount) {
            if resources
                .iter()
                .any(|r| &r.name == name && r.generated >= amount)
            {
                return true;
            }
        }
        match req.total_generated {
            Some(threshold) => total_generated >= threshold,
            None => false,
        }
    }

    /// Output per second before the resource and prestige multipliers.
    pub fn base_rate(&self) -> f64 {
        self.base_production * self.multiplier
    }

    pub fn production_per_second(&self, resource_multiplier: f64, prestige_multiplier: f64) -> f64 {
        if self.owned == 0 {
            return 0.0;
        }
        self.owned as f64 * self.base_rate() * prestige_multiplier * resource_multiplier
    }

    pub fn reset(&mut self) {
        self.owned = 0;
        self.multiplier = 1.0;
    }

    pub fn snapshot(&self) -> WorkerSnapshot {
        WorkerSnapshot {
            name: self.name.clone(),
            amount_owned: Some(self.owned),
            multiplier: Some(self.multiplier),
        }
    }

    pub fn hydrate(&mut self, snap: &WorkerSnapshot) {
        self.owned = snap.amount_owned.unwrap_or(self.owned);
        self.multiplier = snap.multiplier.unwrap_or(self.multiplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;

    fn worker(i: usize) -> Worker {
        Worker::from_def(&EngineConfig::default().workers[i])
    }

    #[test]
    fn cost_scales_geometrically() {
        let mut w = worker(0);
        assert_eq!(w.current_cost(), 10.0);
        w.owned = 2;
        assert!((w.current_cost() - 10.0 * 1.15 * 1.15).abs() < 1e-9);
    }

    #[test]
    fn unlock_by_resource_generated_or_total() {
        let cfg = EngineConfig::default();
        let mut resources: Vec<Resource> = cfg.resources.iter().map(Resource::from_def).collect();
        let coop = worker(1);
        assert!(!coop.is_unlocked(&resources, 0.0));
        resources[0].add(50.0);
        assert!(coop.is_unlocked(&resources, 0.0));

        let engineer = worker(2);
        assert!(!engineer.is_unlocked(&resources, 499.0));
        assert!(engineer.is_unlocked(&resources, 500.0));
    }

    #[test]
    fn idle_workers_produce_nothing() {
        let mut w = worker(0);
        assert_eq!(w.production_per_second(2.0, 1.5), 0.0);
        w.owned = 4;
        assert!((w.production_per_second(2.0, 1.5) - 4.0 * 0.5 * 2.0 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn cost_stays_monotonic_past_i32_range() {
        let mut w = worker(0);
        w.owned = i32::MAX as u32;
        let at_max = w.current_cost();
        w.owned = u32::MAX;
        assert!(w.current_cost() >= at_max);
        assert!(w.current_cost() > 0.0);
    }
}
