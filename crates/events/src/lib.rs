//! Domain events and their in-process distribution.
//!
//! Ledgers emit events describing each accepted mutation; UI-layer
//! subscribers receive them through an [`EventBus`] without the ledger
//! knowing who listens.

pub mod bus;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription, publish_all};
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
