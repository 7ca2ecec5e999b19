//! Asynchronous fetch-and-publish bridge between a launcher front end and a
//! ladder backend.

pub mod controller;
pub mod error;
pub mod events;
pub mod model;
pub mod runtime;
pub mod state;
pub mod view;

pub use controller::LadderBridge;
pub use error::{BridgeError, FailureCategory, FetchFailure};
pub use events::LadderEvent;
pub use model::{CharacterRole, LadderModel};
pub use state::LadderSnapshot;
pub use view::{ChannelView, LadderView, NullView};
