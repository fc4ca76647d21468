//! Squeezing core: the state store, the quality model and the deferred
//! completion machinery. Nothing here depends on the terminal UI.

pub mod format;
pub mod model;
pub mod quality;
pub mod random;
pub mod shared;
pub mod stages;
pub mod store;
pub mod timer;

pub use model::{CitrusObject, CitrusSize, JuiceCollection, JuiceQuality, LemonId};
pub use store::{SqueezeTicket, SqueezerStore, StoreChange};
