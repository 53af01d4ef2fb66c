//! Location resolution and the prayer-status session that the views render.

pub mod fetch;
pub mod resolver;
pub mod scheduler;
pub mod state;

pub use fetch::Services;
pub use resolver::{resolve_startup, Startup};
pub use scheduler::{TaskKind, Timers};
pub use state::{Effect, FetchRequest, Msg, Phase, PrayerRow, Session, Snapshot};
