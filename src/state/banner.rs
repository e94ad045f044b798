use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// How long a banner stays up, per screen that raises it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerScope {
    Game,
    Market,
    Combat,
    Idle,
}

impl BannerScope {
    pub fn ttl_ms(self) -> i32 {
        match self {
            BannerScope::Game => 4000,
            BannerScope::Market => 4000,
            BannerScope::Combat => 5000,
            BannerScope::Idle => 3000,
        }
    }
}

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
}

#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    /// Unique per banner so a late expiry never clears a newer message.
    pub id: u64,
    pub text: String,
    pub kind: BannerKind,
    pub ttl_ms: i32,
}

impl Banner {
    fn new(text: impl Into<String>, kind: BannerKind, scope: BannerScope) -> Self {
        let id = NEXT_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        Self {
            id,
            text: text.into(),
            kind,
            ttl_ms: scope.ttl_ms(),
        }
    }

    pub fn success(text: impl Into<String>, scope: BannerScope) -> Self {
        Self::new(text, BannerKind::Success, scope)
    }

    pub fn error(text: impl Into<String>, scope: BannerScope) -> Self {
        Self::new(text, BannerKind::Error, scope)
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            BannerKind::Success => "banner banner-success",
            BannerKind::Error => "banner banner-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ttl_follows_scope() {
        let a = Banner::success("Bought", BannerScope::Market);
        let b = Banner::error("Nope", BannerScope::Combat);
        assert_ne!(a.id, b.id);
        assert_eq!(a.ttl_ms, 4000);
        assert_eq!(b.ttl_ms, 5000);
        assert_eq!(Banner::success("Saved", BannerScope::Idle).ttl_ms, 3000);
        assert_eq!(b.css_class(), "banner banner-error");
    }
}
