//! Self-contained idle game: resources produced by hired workers, one-off
//! upgrades that bend multipliers, and a prestige reset that trades the
//! current run for a permanent production bonus.

pub mod config;
pub mod prestige;
pub mod resource;
pub mod save;
pub mod upgrade;
pub mod worker;

use std::rc::Rc;
use thiserror::Error;
use yew::Reducible;

pub use config::EngineConfig;
use config::UpgradeTarget;
pub use prestige::Prestige;
pub use resource::Resource;
use save::{PrestigeSnapshot, SaveData, Totals};
pub use upgrade::Upgrade;
pub use worker::Worker;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("unknown worker {0}")]
    UnknownWorker(String),
    #[error("unknown upgrade {0}")]
    UnknownUpgrade(String),
    #[error("unknown resource {0}")]
    UnknownResource(String),
    #[error("{0} is still locked")]
    Locked(String),
    #[error("not enough {resource}: need {needed:.2}, have {available:.2}")]
    Insufficient {
        resource: String,
        needed: f64,
        available: f64,
    },
    #[error("{0} is already purchased")]
    AlreadyPurchased(String),
    #[error("nothing to prestige yet")]
    NothingToPrestige,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameEngine {
    pub config: EngineConfig,
    /// Kept in config order for display.
    pub resources: Vec<Resource>,
    pub workers: Vec<Worker>,
    pub upgrades: Vec<Upgrade>,
    pub total_generated: f64,
    pub prestige: Prestige,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        let resources = config.resources.iter().map(Resource::from_def).collect();
        let workers = config.workers.iter().map(Worker::from_def).collect();
        let upgrades = config.upgrades.iter().map(Upgrade::from_def).collect();
        let prestige = Prestige::new(config.prestige_power_per_point);
        Self {
            config,
            resources,
            workers,
            upgrades,
            total_generated: 0.0,
            prestige,
        }
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    fn resource_mut(&mut self, name: &str) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.name == name)
    }

    pub fn worker(&self, name: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.name == name)
    }

    pub fn global_multiplier(&self) -> f64 {
        self.prestige.global_multiplier()
    }

    pub fn potential_prestige(&self) -> u64 {
        Prestige::potential_points(self.total_generated)
    }

    pub fn can_prestige(&self) -> bool {
        self.potential_prestige() > 0
    }

    /// Advance production by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let prestige = self.global_multiplier();
        for worker in &self.workers {
            if worker.owned == 0 {
                continue;
            }
            let Some(resource) = self.resources.iter_mut().find(|r| r.name == worker.produces) else {
                continue;
            };
            let produced = worker.production_per_second(resource.multiplier, prestige) * dt;
            resource.add(produced);
            self.total_generated += produced;
        }
    }

    pub fn manual_gain(&self) -> f64 {
        let multiplier = self
            .resource(&self.config.primary_resource)
            .map(|r| r.multiplier)
            .unwrap_or(1.0);
        self.config.manual_click_base * multiplier * self.global_multiplier()
    }

    pub fn manual_click(&mut self) -> Result<f64, EngineError> {
        let gain = self.manual_gain();
        let primary = self.config.primary_resource.clone();
        let resource = self
            .resource_mut(&primary)
            .ok_or(EngineError::UnknownResource(primary))?;
        resource.add(gain);
        self.total_generated += gain;
        Ok(gain)
    }

    pub fn worker_unlocked(&self, worker: &Worker) -> bool {
        worker.is_unlocked(&self.resources, self.total_generated)
    }

    pub fn worker_affordable(&self, worker: &Worker) -> bool {
        self.resource(&worker.cost_resource)
            .is_some_and(|r| r.amount >= worker.current_cost())
    }

    pub fn upgrade_visible(&self, upgrade: &Upgrade) -> bool {
        upgrade.is_visible(&self.resources, self.total_generated)
    }

    pub fn upgrade_affordable(&self, upgrade: &Upgrade) -> bool {
        upgrade.is_affordable(&self.resources)
    }

    pub fn purchase_worker(&mut self, name: &str) -> Result<(), EngineError> {
        let idx = self
            .workers
            .iter()
            .position(|w| w.name == name)
            .ok_or_else(|| EngineError::UnknownWorker(name.to_string()))?;
        if !self.worker_unlocked(&self.workers[idx]) {
            return Err(EngineError::Locked(name.to_string()));
        }
        let cost = self.workers[idx].current_cost();
        let cost_resource = self.workers[idx].cost_resource.clone();
        let resource = self
            .resource_mut(&cost_resource)
            .ok_or_else(|| EngineError::UnknownResource(cost_resource.clone()))?;
        if !resource.spend(cost) {
            return Err(EngineError::Insufficient {
                resource: cost_resource,
                needed: cost,
                available: resource.amount,
            });
        }
        self.workers[idx].owned += 1;
        Ok(())
    }

    pub fn purchase_upgrade(&mut self, name: &str) -> Result<(), EngineError> {
        let idx = self
            .upgrades
            .iter()
            .position(|u| u.name == name)
            .ok_or_else(|| EngineError::UnknownUpgrade(name.to_string()))?;
        if self.upgrades[idx].purchased {
            return Err(EngineError::AlreadyPurchased(name.to_string()));
        }
        let cost = self.upgrades[idx].cost.clone();
        let resource = self
            .resource_mut(&cost.resource)
            .ok_or_else(|| EngineError::UnknownResource(cost.resource.clone()))?;
        if !resource.spend(cost.amount) {
            return Err(EngineError::Insufficient {
                resource: cost.resource,
                needed: cost.amount,
                available: resource.amount,
            });
        }

        let effect = self.upgrades[idx].effect;
        match self.upgrades[idx].target.clone() {
            UpgradeTarget::Resource { name } => {
                if let Some(r) = self.resource_mut(&name) {
                    effect.apply_to(&mut r.multiplier);
                }
            }
            UpgradeTarget::AllResources => {
                for r in &mut self.resources {
                    effect.apply_to(&mut r.multiplier);
                }
            }
            UpgradeTarget::Worker { name } => {
                if let Some(w) = self.workers.iter_mut().find(|w| w.name == name) {
                    effect.apply_to(&mut w.multiplier);
                }
            }
        }
        self.upgrades[idx].purchased = true;
        Ok(())
    }

    /// Bank prestige points and wipe the run. Returns the points gained.
    pub fn prestige(&mut self) -> Result<u64, EngineError> {
        let gained = self.potential_prestige();
        if gained == 0 {
            return Err(EngineError::NothingToPrestige);
        }
        self.prestige.grant(gained);
        self.reset_progress();
        Ok(gained)
    }

    pub fn reset_progress(&mut self) {
        self.resources.iter_mut().for_each(Resource::reset);
        self.workers.iter_mut().for_each(Worker::reset);
        self.upgrades.iter_mut().for_each(Upgrade::reset);
        self.total_generated = 0.0;
    }

    pub fn snapshot(&self, saved_at: f64) -> SaveData {
        SaveData {
            resources: self.resources.iter().map(Resource::snapshot).collect(),
            workers: self.workers.iter().map(Worker::snapshot).collect(),
            upgrades: self.upgrades.iter().map(Upgrade::snapshot).collect(),
            totals: Totals {
                total_generated: self.total_generated,
            },
            prestige: PrestigeSnapshot {
                owned: Some(self.prestige.owned),
                lifetime: Some(self.prestige.lifetime),
            },
            saved_at,
        }
    }

    /// Entries naming unknown resources, workers or upgrades are skipped.
    pub fn restore(&mut self, save: &SaveData) {
        for snap in &save.resources {
            if let Some(r) = self.resource_mut(&snap.name) {
                r.hydrate(snap);
            }
        }
        for snap in &save.workers {
            if let Some(w) = self.workers.iter_mut().find(|w| w.name == snap.name) {
                w.hydrate(snap);
            }
        }
        for snap in &save.upgrades {
            if let Some(u) = self.upgrades.iter_mut().find(|u| u.name == snap.name) {
                u.hydrate(snap);
            }
        }
        self.total_generated = save.totals.total_generated.max(0.0);
        let owned = save.prestige.owned.unwrap_or(0);
        self.prestige.owned = owned;
        self.prestige.lifetime = save.prestige.lifetime.unwrap_or(owned);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug, PartialEq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdleState {
    pub engine: GameEngine,
    /// Bumped on every applied action so views can key effects on it.
    pub version: u64,
    pub status: Option<(String, StatusKind)>,
    /// Bumped when an action must reach storage right away instead of at the next autosave.
    pub save_requested: u64,
}

impl Default for IdleState {
    fn default() -> Self {
        Self {
            engine: GameEngine::default(),
            version: 0,
            status: None,
            save_requested: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub enum IdleAction {
    Tick { dt: f64 },
    Click,
    HireWorker(String),
    BuyUpgrade(String),
    Prestige,
    Restore(SaveData),
    /// Wipes everything, prestige included.
    HardReset,
    SetStatus(String),
    SetError(String),
    ClearStatus,
}

impl Reducible for IdleState {
    type Action = IdleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use IdleAction::*;
        let mut new = (*self).clone();
        match action {
            Tick { dt } => new.engine.tick(dt),
            Click => {
                if let Err(err) = new.engine.manual_click() {
                    new.status = Some((err.to_string(), StatusKind::Error));
                }
            }
            HireWorker(name) => {
                if let Err(err) = new.engine.purchase_worker(&name) {
                    new.status = Some((err.to_string(), StatusKind::Error));
                }
            }
            BuyUpgrade(name) => {
                if let Err(err) = new.engine.purchase_upgrade(&name) {
                    new.status = Some((err.to_string(), StatusKind::Error));
                }
            }
            Prestige => match new.engine.prestige() {
                Ok(gained) => {
                    new.status = Some((format!("Gained {gained} prestige points!"), StatusKind::Info));
                    new.save_requested += 1;
                }
                Err(err) => new.status = Some((err.to_string(), StatusKind::Error)),
            },
            Restore(save) => new.engine.restore(&save),
            HardReset => {
                new.engine = GameEngine::new(new.engine.config.clone());
                new.status = Some(("Progress reset.".to_string(), StatusKind::Info));
                new.save_requested += 1;
            }
            SetStatus(text) => new.status = Some((text, StatusKind::Info)),
            SetError(text) => new.status = Some((text, StatusKind::Error)),
            ClearStatus => {
                if new.status.is_none() {
                    return self;
                }
                new.status = None;
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::config::{AGRO, CREDITS, WILL};
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::default()
    }

    fn amount(e: &GameEngine, name: &str) -> f64 {
        e.resource(name).unwrap().amount
    }

    #[test]
    fn click_adds_primary_and_total() {
        let mut e = engine();
        assert_eq!(e.manual_click(), Ok(1.0));
        assert_eq!(amount(&e, WILL), 1.0);
        assert_eq!(e.total_generated, 1.0);
    }

    #[test]
    fn hiring_without_funds_changes_nothing() {
        let mut e = engine();
        let before = e.clone();
        let err = e.purchase_worker("Uliční agitátor").unwrap_err();
        assert!(matches!(err, EngineError::Insufficient { .. }));
        assert_eq!(e, before);
    }

    #[test]
    fn hiring_spends_and_never_goes_negative() {
        let mut e = engine();
        for _ in 0..10 {
            e.manual_click().unwrap();
        }
        e.purchase_worker("Uliční agitátor").unwrap();
        assert_eq!(amount(&e, WILL), 0.0);
        assert_eq!(e.worker("Uliční agitátor").unwrap().owned, 1);
        // next costs 11.5, only 0 available
        assert!(e.purchase_worker("Uliční agitátor").is_err());
        assert!(amount(&e, WILL) >= 0.0);
    }

    #[test]
    fn locked_worker_is_refused() {
        let mut e = engine();
        e.resources[0].amount = 1_000.0;
        assert_eq!(
            e.purchase_worker("Agrární kooperátor"),
            Err(EngineError::Locked("Agrární kooperátor".into()))
        );
        assert_eq!(amount(&e, WILL), 1_000.0);
    }

    #[test]
    fn tick_produces_with_all_multipliers() {
        let mut e = engine();
        e.workers[1].owned = 2; // cooperator -> agro (multiplier 1.2)
        e.prestige.owned = 5; // 1.4x
        e.tick(0.5);
        let expected = 2.0 * 0.8 * 1.0 * 0.5 * 1.4 * 1.2;
        assert!((amount(&e, AGRO) - expected).abs() < 1e-9);
        assert!((e.total_generated - expected).abs() < 1e-9);
    }

    #[test]
    fn tick_ignores_bad_deltas() {
        let mut e = engine();
        e.workers[0].owned = 1;
        e.tick(-1.0);
        e.tick(f64::NAN);
        e.tick(f64::INFINITY);
        assert_eq!(amount(&e, WILL), 0.0);
    }

    #[test]
    fn upgrade_multiplies_resource() {
        let mut e = engine();
        e.resources[0].amount = 100.0;
        e.purchase_upgrade("Duplikát letáků").unwrap();
        assert_eq!(amount(&e, WILL), 20.0);
        assert_eq!(e.resource(WILL).unwrap().multiplier, 2.0);
        assert_eq!(e.manual_gain(), 2.0);
        assert_eq!(
            e.purchase_upgrade("Duplikát letáků"),
            Err(EngineError::AlreadyPurchased("Duplikát letáků".into()))
        );
    }

    #[test]
    fn all_resources_upgrade_adds_to_every_multiplier() {
        let mut e = engine();
        e.resources[2].amount = 200.0;
        e.purchase_upgrade("Tovární rozhlas").unwrap();
        assert_eq!(e.resource(WILL).unwrap().multiplier, 1.25);
        assert!((e.resource(AGRO).unwrap().multiplier - 1.45).abs() < 1e-9);
        assert_eq!(amount(&e, CREDITS), 0.0);
    }

    #[test]
    fn worker_upgrade_targets_worker() {
        let mut e = engine();
        e.resources[1].amount = 150.0;
        e.purchase_upgrade("Kompostové pásy").unwrap();
        assert_eq!(e.worker("Agrární kooperátor").unwrap().multiplier, 1.5);
    }

    #[test]
    fn prestige_resets_run_and_keeps_points() {
        let mut e = engine();
        assert_eq!(e.prestige(), Err(EngineError::NothingToPrestige));
        e.resources[0].amount = 500.0;
        e.workers[0].owned = 3;
        e.upgrades[0].purchased = true;
        e.total_generated = 1_234.0;
        assert_eq!(e.prestige(), Ok(3));
        assert_eq!(e.prestige.owned, 3);
        assert_eq!(e.prestige.lifetime, 3);
        assert_eq!(e.total_generated, 0.0);
        assert_eq!(amount(&e, WILL), 0.0);
        assert_eq!(e.workers[0].owned, 0);
        assert!(!e.upgrades[0].purchased);
        assert!((e.global_multiplier() - 1.24).abs() < 1e-9);
    }

    #[test]
    fn snapshot_restores_into_fresh_engine() {
        let mut e = engine();
        e.resources[0].amount = 42.0;
        e.resources[0].generated = 60.0;
        e.workers[0].owned = 2;
        e.upgrades[0].purchased = true;
        e.total_generated = 60.0;
        e.prestige.grant(2);
        let save = e.snapshot(123.0);

        let mut restored = engine();
        restored.restore(&save);
        assert_eq!(restored.resources, e.resources);
        assert_eq!(restored.workers, e.workers);
        assert_eq!(restored.upgrades, e.upgrades);
        assert_eq!(restored.total_generated, 60.0);
        assert_eq!(restored.prestige, e.prestige);
    }

    #[test]
    fn restore_defaults_lifetime_to_owned_and_skips_unknown() {
        let raw = r#"{
            "resources": [{"name": "Nope", "amount": 9}],
            "prestige": {"owned": 4}
        }"#;
        let save: SaveData = serde_json::from_str(raw).unwrap();
        let mut e = engine();
        e.restore(&save);
        assert_eq!(e.prestige.owned, 4);
        assert_eq!(e.prestige.lifetime, 4);
        assert_eq!(amount(&e, WILL), 0.0);
    }

    #[test]
    fn reducer_reports_failed_purchase() {
        let state = Rc::new(IdleState::default());
        let next = state.reduce(IdleAction::HireWorker("Uliční agitátor".into()));
        let (text, kind) = next.status.clone().unwrap();
        assert_eq!(kind, StatusKind::Error);
        assert!(text.contains("not enough"));
        assert_eq!(next.engine, GameEngine::default());
        assert_eq!(next.version, 1);
    }

    #[test]
    fn reducer_prestige_message() {
        let mut base = IdleState::default();
        base.engine.total_generated = 150.0;
        let next = Rc::new(base).reduce(IdleAction::Prestige);
        assert_eq!(
            next.status,
            Some(("Gained 2 prestige points!".to_string(), StatusKind::Info))
        );
        assert_eq!(next.engine.prestige.owned, 2);
    }

    #[test]
    fn hard_reset_clears_prestige_too() {
        let mut base = IdleState::default();
        base.engine.prestige.owned = 3;
        base.engine.total_generated = 500.0;
        let next = Rc::new(base).reduce(IdleAction::HardReset);
        assert_eq!(next.engine.prestige.owned, 0);
        assert_eq!(next.engine.total_generated, 0.0);
    }

    #[test]
    fn restores_blob_written_by_the_old_client() {
        let raw = r#"{
            "resources": [{"name": "Kolektivní Vůle", "amount": 5000, "generated": 5200}],
            "workers": [{"name": "Uliční agitátor", "amountOwned": 7}],
            "upgrades": [{"name": "Duplikát letáků", "purchased": true}],
            "totals": {"totalGenerated": 5200},
            "prestige": {"owned": 2, "lifetime": 3}
        }"#;
        let save: SaveData = serde_json::from_str(raw).unwrap();
        let mut e = engine();
        e.restore(&save);
        assert_eq!(amount(&e, WILL), 5000.0);
        assert_eq!(e.worker("Uliční agitátor").unwrap().owned, 7);
        assert!(e.upgrades.iter().any(|u| u.name == "Duplikát letáků" && u.purchased));
        assert_eq!(e.total_generated, 5200.0);
        assert_eq!(e.prestige.owned, 2);
        assert_eq!(e.prestige.lifetime, 3);
    }

    #[test]
    fn set_error_flags_status_as_error() {
        let state = Rc::new(IdleState::default());
        let next = state.reduce(IdleAction::SetError("Could not save.".into()));
        assert_eq!(
            next.status,
            Some(("Could not save.".to_string(), StatusKind::Error))
        );
        let info = next.reduce(IdleAction::SetStatus("Saved.".into()));
        assert_eq!(info.status.as_ref().map(|(_, k)| k), Some(&StatusKind::Info));
    }

    #[test]
    fn prestige_and_reset_request_an_immediate_save() {
        let state = Rc::new(IdleState::default());
        let refused = state.clone().reduce(IdleAction::Prestige);
        assert_eq!(refused.save_requested, 0);

        let mut base = IdleState::default();
        base.engine.total_generated = 150.0;
        let after_prestige = Rc::new(base).reduce(IdleAction::Prestige);
        assert_eq!(after_prestige.save_requested, 1);

        let after_reset = after_prestige.reduce(IdleAction::HardReset);
        assert_eq!(after_reset.save_requested, 2);
        let ticked = after_reset.reduce(IdleAction::Tick { dt: 1.0 });
        assert_eq!(ticked.save_requested, 2);
    }
}
