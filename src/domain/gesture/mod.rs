pub mod events;
pub mod options;
pub mod ports;
pub mod resistance;
pub mod value_objects;

pub use events::{DomainEvent, PullEvent, SubscriptionId, Subscribers};
pub use options::{LongPressOptions, PullToRefreshOptions};
pub use ports::{Haptics, Scheduler, ScrollSurface, TimerHandle};
pub use resistance::ResistanceCurve;
pub use value_objects::{
    DirectionLock, MoveResponse, Point, PressInfo, PressOutcome, PressSource, PullSnapshot,
    PullState,
};
