//! Domain layer for the claims resolver.

pub mod chain;
pub mod error;
pub mod slot_swap;

pub use chain::{ResolverChain, ResolverChainBuilder};
pub use error::ChainConfigError;
pub use slot_swap::{TokenSlotSwapResolver, looks_like_jwt};
