//! The compute-graph harness built on `cafberiht`.
//!
//! [`CoreType`](ops::CoreType) enumerates the operations of a transformer
//! graph, [`CoreInterface`](mixin::CoreInterface) is the per-operation
//! element and [`CoreCafberiht`] holds the first
//! [`CAFBERIHT_WIDTH`] of them. Walking it with
//! [`AdditionMixin`](mixin::AdditionMixin) adds one random draw per
//! even-numbered operation.

pub mod cli;
pub mod config;
pub mod layout;
pub mod mixin;
pub mod ops;
pub mod telemetry;

pub use config::{CoreAggregator, CoreCafberiht, CAFBERIHT_WIDTH};

use cafberiht::VisitAll;
use mixin::{Accumulator, AdditionMixin};

/// Walks `container` with [`AdditionMixin`] into a fresh accumulator.
pub fn accumulate<C>(container: &mut C) -> Accumulator
where
    C: VisitAll<AdditionMixin, Accumulator>,
{
    let mut accumulator = Accumulator::new();
    container.visit_all(&mut accumulator);
    accumulator
}
