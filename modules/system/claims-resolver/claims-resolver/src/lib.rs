//! Claims Resolver Module
//!
//! Composes independent claims resolvers into one answer for the
//! authorization-decision engine:
//!
//! - [`ResolverChain`] tries resolvers in registration order and adopts the
//!   first meaningful claims. A failing resolver is logged and skipped.
//! - [`TokenSlotSwapResolver`] lets a signed-token resolver read a token passed
//!   in the secondary credential slot.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::ClaimsResolverConfig;
pub use domain::{
    ChainConfigError, ResolverChain, ResolverChainBuilder, TokenSlotSwapResolver, looks_like_jwt,
};
