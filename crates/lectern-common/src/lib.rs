pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, LecternError, TextLayerError};
pub use events::{Event, EventBus};
pub use types::{NodeId, Rect};

pub type Result<T> = std::result::Result<T, LecternError>;
