//! Frost Runtime - Game loop building blocks
//!
//! - `FrameClock` - variable-delta clock over a pluggable `TimeSource`
//! - `System` / `SystemSchedule` - per-tick logic run in a fixed order
//! - `Lifecycle` - the running/paused state machine
//! - `PointerQueue` / `InputSource` - pointer events marshalled to the game
//! - `GameEvent` / `EventBus` - outcomes for audio, UI and analytics hosts
//! - `Landing` - completion handle for an effect that finishes on a later tick

mod clock;
mod event;
mod event_bus;
mod input;
mod landing;
mod lifecycle;
mod schedule;
mod system;

pub use clock::{FrameClock, ManualTime, MonotonicTime, TimeSource};
pub use event::GameEvent;
pub use event_bus::EventBus;
pub use input::{InputSource, PointerEvent, PointerKind, PointerQueue, Viewport};
pub use landing::{landing, Arrival, Landing, LandingSignal, LandingStatus};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use schedule::SystemSchedule;
pub use system::{AsAny, System};
