//! Power-aware module capability.

/// A long-lived owner of peripheral state that must react to global
/// deep-sleep transitions.
///
/// Both callbacks default to blocking forever. A module that owns hardware has
/// to say explicitly what it does on sleep and wake, even if that is nothing;
/// forgetting an override hangs the first transition instead of letting a
/// peripheral run unattended through sleep.
///
/// Callbacks take `&self` and may run from an interrupt or another task, so
/// implementors keep mutable state behind atomics or a critical-section mutex.
pub trait PowerAware: Sync {
    /// Quiesce the owned peripheral before the core enters deep sleep.
    fn enter_deep_sleep(&self) {
        park()
    }

    /// Restore the owned peripheral after wake-up.
    fn exit_deep_sleep(&self) {
        park()
    }

    /// Name used in transition logs.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Never return. Used by the default callbacks.
fn park() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
