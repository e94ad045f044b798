pub mod banner;
pub mod cooldown;
pub mod theme;
pub mod timer;

pub use banner::{Banner, BannerKind, BannerScope};
pub use cooldown::{Cooldown, CooldownAction};
pub use theme::Theme;
pub use timer::{Interval, Timeout};
