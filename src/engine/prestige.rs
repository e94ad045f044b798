#[derive(Clone, Debug, PartialEq)]
pub struct Prestige {
    /// Points currently boosting production.
    pub owned: u64,
    /// Every point ever earned.
    pub lifetime: u64,
    pub power_per_point: f64,
}

impl Prestige {
    pub fn new(power_per_point: f64) -> Self {
        Self {
            owned: 0,
            lifetime: 0,
            power_per_point,
        }
    }

    pub fn potential_points(total_generated: f64) -> u64 {
        if !(total_generated > 0.0) {
            return 0;
        }
        let points = total_generated.log10().floor();
        if points > 0.0 { points as u64 } else { 0 }
    }

    pub fn global_multiplier(&self) -> f64 {
        1.0 + self.owned as f64 * self.power_per_point
    }

    pub fn grant(&mut self, points: u64) {
        self.owned = self.owned.saturating_add(points);
        self.lifetime = self.lifetime.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_log10() {
        assert_eq!(Prestige::potential_points(0.0), 0);
        assert_eq!(Prestige::potential_points(9.99), 0);
        assert_eq!(Prestige::potential_points(10.0), 1);
        assert_eq!(Prestige::potential_points(12_345.0), 4);
        assert_eq!(Prestige::potential_points(-5.0), 0);
    }

    #[test]
    fn multiplier_grows_per_point() {
        let mut p = Prestige::new(0.08);
        assert_eq!(p.global_multiplier(), 1.0);
        p.grant(3);
        assert!((p.global_multiplier() - 1.24).abs() < 1e-9);
        assert_eq!(p.lifetime, 3);
    }
}
