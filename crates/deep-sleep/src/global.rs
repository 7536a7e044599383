//! The process-wide coordinator.
//!
//! Firmware images use this single instance. Separate
//! [`DeepSleepCoordinator`] values are only useful for tests and for
//! subsystems that sequence their own, private transitions.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::config::MAX_POWER_AWARE_MODULES;
use crate::coordinator::DeepSleepCoordinator;
use crate::node::PowerAwareNode;

/// Coordinator type behind [`DEEP_SLEEP`].
///
/// Guarded by a critical section: modules are created and dropped from
/// several tasks, and power management may request a transition from an
/// interrupt.
///
/// The critical section is held for the whole transition, so every
/// `enter_deep_sleep`/`exit_deep_sleep` callback runs with interrupts masked.
/// Callbacks must not wait on an interrupt (DMA completion, a UART flush
/// signalled by IRQ, an async executor); poll the peripheral's status flags
/// instead and keep the work short.
pub type GlobalCoordinator = DeepSleepCoordinator<CriticalSectionRawMutex, MAX_POWER_AWARE_MODULES>;

/// Node registered with [`DEEP_SLEEP`].
pub type GlobalNode<T> =
    PowerAwareNode<'static, T, CriticalSectionRawMutex, MAX_POWER_AWARE_MODULES>;

/// Every power-aware module of the running image.
pub static DEEP_SLEEP: GlobalCoordinator = DeepSleepCoordinator::new();

impl<T: crate::PowerAware + 'static> GlobalNode<T> {
    /// Wrap `module` for registration with [`DEEP_SLEEP`].
    ///
    /// Not registered yet: pin the node and call
    /// [`register`](PowerAwareNode::register) right away.
    #[must_use = "pin the node and register it, or its module never sees a transition"]
    pub fn global(module: T) -> Self {
        Self::new(&DEEP_SLEEP, module)
    }
}

/// Quiesce every registered module, in registration order.
///
/// Called by power management just before the core stops its clocks.
pub fn enter_global_deep_sleep() {
    DEEP_SLEEP.enter_deep_sleep();
}

/// Restore every registered module, in registration order.
///
/// Called by power management after wake-up, once clocks are back.
pub fn exit_global_deep_sleep() {
    DEEP_SLEEP.exit_deep_sleep();
}
