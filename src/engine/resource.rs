use super::config::ResourceDef;
use super::save::ResourceSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    pub name: String,
    pub amount: f64,
    pub multiplier: f64,
    pub base_multiplier: f64,
    /// Produced during the current run; drives unlocks and resets on prestige.
    pub generated: f64,
}

impl Resource {
    pub fn from_def(def: &ResourceDef) -> Self {
        Self {
            name: def.name.clone(),
            amount: 0.0,
            multiplier: def.multiplier,
            base_multiplier: def.multiplier,
            generated: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.amount = 0.0;
        self.multiplier = self.base_multiplier;
        self.generated = 0.0;
    }

    /// Non-positive and NaN gains are ignored.
    pub fn add(&mut self, value: f64) {
        if !(value > 0.0) {
            return;
        }
        self.amount += value;
        self.generated += value;
    }

    /// Leaves the amount untouched when it cannot cover `cost`.
    pub fn spend(&mut self, cost: f64) -> bool {
        if self.amount < cost {
            return false;
        }
        self.amount -= cost;
        true
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            name: self.name.clone(),
            amount: Some(self.amount),
            multiplier: Some(self.multiplier),
            generated: Some(self.generated),
        }
    }

    pub fn hydrate(&mut self, snap: &ResourceSnapshot) {
        self.amount = snap.amount.unwrap_or(self.amount).max(0.0);
        self.multiplier = snap.multiplier.unwrap_or(self.base_multiplier);
        self.generated = snap.generated.unwrap_or(self.generated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> Resource {
        Resource::from_def(&ResourceDef {
            name: "Gold".into(),
            base_production: 0.0,
            multiplier: 1.5,
        })
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut r = gold();
        r.add(10.0);
        assert!(!r.spend(10.5));
        assert_eq!(r.amount, 10.0);
        assert!(r.spend(10.0));
        assert_eq!(r.amount, 0.0);
    }

    #[test]
    fn add_ignores_non_positive() {
        let mut r = gold();
        r.add(-3.0);
        r.add(0.0);
        r.add(f64::NAN);
        assert_eq!(r.amount, 0.0);
        assert_eq!(r.generated, 0.0);
    }

    #[test]
    fn hydrate_falls_back_to_base_multiplier() {
        let mut r = gold();
        r.multiplier = 9.0;
        r.hydrate(&ResourceSnapshot {
            name: "Gold".into(),
            amount: Some(4.0),
            multiplier: None,
            generated: None,
        });
        assert_eq!(r.amount, 4.0);
        assert_eq!(r.multiplier, 1.5);
    }
}
