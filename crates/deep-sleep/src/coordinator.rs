//! Registration list and global transition sequencing.

use core::cell::{Cell, RefCell};
use core::ptr::NonNull;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;

use crate::module::PowerAware;

/// Errors from [`PowerAwareNode::register`](crate::PowerAwareNode::register).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Every slot is taken.
    CoordinatorFull {
        /// Fixed capacity of the coordinator.
        capacity: usize,
    },
    /// The node is already in the list.
    AlreadyRegistered,
    /// Called from inside an enter/exit callback.
    TransitionInProgress,
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CoordinatorFull { capacity } => {
                write!(f, "deep-sleep coordinator full ({capacity} modules)")
            }
            Self::AlreadyRegistered => write!(f, "module already registered"),
            Self::TransitionInProgress => {
                write!(f, "cannot register during a deep-sleep transition")
            }
        }
    }
}

impl core::error::Error for RegisterError {}

/// Non-owning reference to a registered module, keyed by the address of the
/// node that registered it (modules themselves may be zero-sized).
///
/// `removed` marks an entry deregistered while the list is being walked; it
/// is skipped for the rest of the walk and dropped once the walk ends.
struct Entry {
    key: NonNull<()>,
    module: NonNull<dyn PowerAware>,
    removed: Cell<bool>,
}

// SAFETY: `PowerAware: Sync`, so the pointee may be reached through a shared
// reference from whichever context runs a transition. The pointer is only
// dereferenced while the module is registered (see `register`).
unsafe impl Send for Entry {}

/// Process-wide list of live power-aware modules.
///
/// `M` picks the lock: `CriticalSectionRawMutex` when registration or
/// transitions can happen from interrupts or several tasks,
/// `NoopRawMutex` for a single-context coordinator. `N` is the capacity.
///
/// The coordinator does not track whether the system is asleep; that belongs
/// to the power-management caller.
pub struct DeepSleepCoordinator<M: RawMutex, const N: usize> {
    modules: Mutex<M, RefCell<Vec<Entry, N>>>,
}

impl<M: RawMutex, const N: usize> DeepSleepCoordinator<M, N> {
    /// Empty coordinator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modules: Mutex::new(RefCell::new(Vec::new())),
        }
    }

    /// Maximum number of registered modules.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.lock(|modules| {
            modules
                .borrow()
                .iter()
                .filter(|entry| !entry.removed.get())
                .count()
        })
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call [`PowerAware::enter_deep_sleep`] on every registered module, in
    /// registration order.
    ///
    /// Blocks until every callback returns. A callback that never returns
    /// stalls all modules after it; there is no timeout.
    pub fn enter_deep_sleep(&self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("deep sleep: enter ({=usize} modules)", self.len());
        self.for_each_module(|module| {
            #[cfg(feature = "defmt")]
            defmt::trace!("deep sleep: enter {=str}", module.name());
            module.enter_deep_sleep();
        });
    }

    /// Call [`PowerAware::exit_deep_sleep`] on every registered module, in
    /// registration order.
    pub fn exit_deep_sleep(&self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("deep sleep: exit ({=usize} modules)", self.len());
        self.for_each_module(|module| {
            #[cfg(feature = "defmt")]
            defmt::trace!("deep sleep: exit {=str}", module.name());
            module.exit_deep_sleep();
        });
    }

    /// Run `f` on each registered module while holding the lock, so
    /// registration changes from other contexts wait for the traversal to
    /// finish. Entries deregistered by a callback are skipped, then purged.
    fn for_each_module(&self, mut f: impl FnMut(&dyn PowerAware)) {
        self.modules.lock(|modules| {
            {
                let walking = modules.borrow();
                for entry in walking.iter() {
                    if entry.removed.get() {
                        continue;
                    }
                    // SAFETY: an entry is live only between `register` and
                    // `deregister`; `PowerAwareNode` deregisters in `Drop`,
                    // which pinning guarantees runs before the module is
                    // invalidated. Deregistration from another context waits
                    // for the lock; from a callback it sets `removed`, checked
                    // just above.
                    let module = unsafe { entry.module.as_ref() };
                    f(module);
                }
            }
            // An enclosing walk (a callback that started a nested
            // transition) still holds a borrow and purges when it ends.
            if let Ok(mut modules) = modules.try_borrow_mut() {
                modules.retain(|entry| !entry.removed.get());
            }
        });
    }

    /// Append `module` to the list under `key`.
    ///
    /// # Safety
    ///
    /// `module` must stay valid until [`deregister`](Self::deregister) is
    /// called with the same `key`, and `key` must not be shared with another
    /// live registration.
    pub(crate) unsafe fn register(
        &self,
        key: NonNull<()>,
        module: NonNull<dyn PowerAware>,
    ) -> Result<(), RegisterError> {
        self.modules.lock(|modules| {
            let Ok(mut modules) = modules.try_borrow_mut() else {
                return Err(RegisterError::TransitionInProgress);
            };
            if modules.iter().any(|entry| entry.key == key) {
                return Err(RegisterError::AlreadyRegistered);
            }
            let entry = Entry {
                key,
                module,
                removed: Cell::new(false),
            };
            if modules.push(entry).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("deep sleep: coordinator full ({=usize} modules)", N);
                return Err(RegisterError::CoordinatorFull { capacity: N });
            }
            #[cfg(feature = "defmt")]
            defmt::trace!(
                "deep sleep: registered {=str} ({=usize}/{=usize})",
                // SAFETY: caller guarantees `module` is valid right now.
                unsafe { module.as_ref() }.name(),
                modules.len(),
                N
            );
            Ok(())
        })
    }

    /// Remove the module registered under `key`, keeping the order of the
    /// others. Returns whether it was present.
    ///
    /// Waits for an in-progress transition in another context to finish.
    /// From inside a transition callback of this coordinator the entry is
    /// only marked; the walk skips it and purges it on completion. Either
    /// way the module is never called again once this returns.
    pub(crate) fn deregister(&self, key: NonNull<()>) -> bool {
        self.modules.lock(|modules| {
            let Ok(mut list) = modules.try_borrow_mut() else {
                let walking = modules.borrow();
                let Some(entry) = walking
                    .iter()
                    .find(|entry| entry.key == key && !entry.removed.get())
                else {
                    return false;
                };
                entry.removed.set(true);
                #[cfg(feature = "defmt")]
                defmt::trace!("deep sleep: deregistered during transition");
                return true;
            };
            let before = list.len();
            list.retain(|entry| entry.key != key);
            let removed = list.len() != before;
            #[cfg(feature = "defmt")]
            if removed {
                defmt::trace!("deep sleep: deregistered ({=usize} left)", list.len());
            }
            removed
        })
    }
}

impl<M: RawMutex, const N: usize> Default for DeepSleepCoordinator<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[allow(dead_code)]
    struct Quiet(u8);

    impl PowerAware for Quiet {
        fn enter_deep_sleep(&self) {}
        fn exit_deep_sleep(&self) {}
    }

    #[test]
    fn new_coordinator_is_empty() {
        let coordinator = DeepSleepCoordinator::<NoopRawMutex, 3>::new();
        assert!(coordinator.is_empty());
        assert_eq!(coordinator.capacity(), 3);
        coordinator.enter_deep_sleep();
        coordinator.exit_deep_sleep();
    }

    #[test]
    fn register_rejects_duplicates_and_overflow() {
        let coordinator = DeepSleepCoordinator::<NoopRawMutex, 1>::new();
        let a = Quiet(0);
        let b = Quiet(1);
        let a_key = NonNull::from(&a).cast::<()>();
        let b_key = NonNull::from(&b).cast::<()>();
        let a_ptr: NonNull<dyn PowerAware> = NonNull::from(&a);
        let b_ptr: NonNull<dyn PowerAware> = NonNull::from(&b);

        // SAFETY: `a` and `b` outlive the coordinator in this test.
        unsafe {
            assert_eq!(coordinator.register(a_key, a_ptr), Ok(()));
            assert_eq!(
                coordinator.register(a_key, a_ptr),
                Err(RegisterError::AlreadyRegistered)
            );
            assert_eq!(
                coordinator.register(b_key, b_ptr),
                Err(RegisterError::CoordinatorFull { capacity: 1 })
            );
        }
        assert!(coordinator.deregister(a_key));
        assert!(!coordinator.deregister(a_key));
        assert!(coordinator.is_empty());
    }

    #[test]
    fn register_error_display() {
        assert_eq!(
            RegisterError::CoordinatorFull { capacity: 8 }.to_string(),
            "deep-sleep coordinator full (8 modules)"
        );
        assert_eq!(
            RegisterError::TransitionInProgress.to_string(),
            "cannot register during a deep-sleep transition"
        );
    }
}
