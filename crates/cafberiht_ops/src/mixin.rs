//! Elements and visitors of the compute graph.

use crate::ops::CoreType;

use cafberiht::{Element, Visitor};
use tracing::trace;

use std::hint::black_box;

/// Per-operation state, one per enumerator of a container.
#[derive(Debug, Default, Clone, PartialEq, Eq, Element)]
#[element(enumerator = CoreType)]
pub struct CoreInterface<const E: u64> {
    pub kernel_iteration_count: u64,
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Running total threaded through an [`AdditionMixin`] walk.
///
/// Every write goes through [`black_box`] so the optimizer has to keep each
/// addition, even though only the final sum is printed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Accumulator {
    value: u64,
    additions: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `operand`, wrapping on overflow.
    #[inline]
    pub fn add(&mut self, operand: u64) {
        self.value = black_box(self.value.wrapping_add(black_box(operand)));
        self.additions += 1;
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of calls to [`Accumulator::add`].
    pub fn additions(&self) -> u64 {
        self.additions
    }
}

// ---------------------------------------------------------------------------
// Visitors
// ---------------------------------------------------------------------------

/// Adds a fresh random draw for every operation with an even enumerator.
///
/// Odd operations are filtered out at compile time: their steps do not exist
/// in the walk at all.
pub struct AdditionMixin;

impl AdditionMixin {
    pub const fn admits(value: u64) -> bool {
        value % 2 == 0
    }
}

impl<const E: u64> Visitor<CoreInterface<E>, Accumulator> for AdditionMixin {
    const ADMIT: bool = AdditionMixin::admits(E);

    #[inline]
    fn apply(_: &mut CoreInterface<E>, output: &mut Accumulator) {
        let operand = rand::random::<u64>();
        trace!(enumerator = E, operand, "addition");
        output.add(operand);
    }
}

/// Counts one kernel iteration on every operation.
pub struct KernelTick;

impl<const E: u64> Visitor<CoreInterface<E>, ()> for KernelTick {
    const ADMIT: bool = true;

    #[inline]
    fn apply(core: &mut CoreInterface<E>, _: &mut ()) {
        core.kernel_iteration_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafberiht::{cafberiht, tag, Cafberiht};

    cafberiht! {
        struct Six: CoreInterface<CoreType> = first(6);
        struct Odd: CoreInterface<CoreType> = [CoreType::AttnK, CoreType::AttnOutput];
        struct Tail: CoreInterface<CoreType> = [CoreType::SampleTokens, CoreType::ResultOutputMulMat];
    }

    #[test]
    fn accumulator_wraps() {
        let mut accumulator = Accumulator::new();
        accumulator.add(u64::MAX);
        accumulator.add(2);
        assert_eq!(accumulator.value(), 1);
        assert_eq!(accumulator.additions(), 2);
    }

    #[test]
    fn addition_mixin_filters_odd_operations() {
        let mut six = Six::default();
        let mut accumulator = Accumulator::new();
        six.walk::<AdditionMixin, _>(&mut accumulator);
        assert_eq!(accumulator.additions(), 3);

        let mut odd = Odd::default();
        let mut accumulator = Accumulator::new();
        odd.walk::<AdditionMixin, _>(&mut accumulator);
        assert_eq!(accumulator, Accumulator::new());

        // ResultOutputMulMat is 98, SampleTokens is 99.
        let mut tail = Tail::default();
        let mut accumulator = Accumulator::new();
        tail.walk::<AdditionMixin, _>(&mut accumulator);
        assert_eq!(accumulator.additions(), 1);
    }

    #[test]
    fn kernel_tick_touches_every_operation() {
        let mut six = Six::default();
        six.walk::<KernelTick, _>(&mut ());
        six.walk::<KernelTick, _>(&mut ());
        assert_eq!(six.get(tag!(CoreType::AttnQ)).kernel_iteration_count, 2);
        assert_eq!(six.get_by_index::<5>().kernel_iteration_count, 2);

        six.visit::<KernelTick, CoreInterface<{ CoreType::FfnGate as u64 }>, _, _>(&mut ());
        assert_eq!(six.get(tag!(CoreType::FfnGate)).kernel_iteration_count, 3);
        assert_eq!(six.get(tag!(CoreType::AttnNorm)).kernel_iteration_count, 2);
    }

    #[test]
    fn elements_know_their_operation() {
        assert_eq!(
            <CoreInterface<{ CoreType::KqMask as u64 }> as Element>::ENUMERATOR,
            CoreType::KqMask
        );
        let tail = Tail::default();
        assert_eq!(tail.get_by_index::<0>().enumerator(), CoreType::SampleTokens);
    }
}
