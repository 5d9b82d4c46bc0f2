// Core data models for display updates and rep events.

mod events;

pub use events::{DisplayUpdate, OutputEvent, RepClass, RepCompleted};
