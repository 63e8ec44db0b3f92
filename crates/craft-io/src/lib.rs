//! Edit persistence and the outbound multiplayer client seam.
#![forbid(unsafe_code)]

pub mod client;
pub mod ring;
pub mod store;

pub use client::{Client, ClientRequest, OfflineClient, RecordingClient};
pub use ring::{Ring, RingEntry};
pub use store::{MemoryStore, NullStore, Persistence};
