// Server-reported countdown, decremented locally once a second between refreshes.
use std::rc::Rc;

use yew::Reducible;

use crate::util::format_cooldown;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooldown {
    pub remaining_secs: u64,
}

impl Cooldown {
    pub fn new(remaining_secs: u64) -> Self {
        Self { remaining_secs }
    }

    pub fn tick(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn label(&self) -> String {
        format_cooldown(self.remaining_secs)
    }
}

pub enum CooldownAction {
    Reset(u64),
    Tick,
}

impl Reducible for Cooldown {
    type Action = CooldownAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        match action {
            CooldownAction::Reset(secs) => next = Cooldown::new(secs),
            CooldownAction::Tick => next.tick(),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_ready() {
        let mut cd = Cooldown::new(2);
        assert!(!cd.is_ready());
        cd.tick();
        cd.tick();
        cd.tick();
        assert!(cd.is_ready());
        assert_eq!(cd.label(), "Ready");
        assert_eq!(Cooldown::new(75).label(), "1:15");
    }

    #[test]
    fn reducer_resets_and_ticks() {
        let cd = Rc::new(Cooldown::new(3));
        let cd = cd.reduce(CooldownAction::Tick);
        assert_eq!(cd.remaining_secs, 2);
        let cd = cd.reduce(CooldownAction::Reset(90));
        assert_eq!(cd.remaining_secs, 90);
    }
}
