pub mod client;
pub mod item;

pub use client::{Resource, TrustpilotClient};
pub use item::{Field, Item};
