//! Scoped registration of a power-aware module.

use core::cell::Cell;
use core::marker::PhantomPinned;
use core::ops::Deref;
use core::pin::Pin;
use core::ptr::NonNull;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::coordinator::{DeepSleepCoordinator, RegisterError};
use crate::module::PowerAware;

/// A power-aware module plus its membership in a coordinator.
///
/// The node owns the module; the coordinator only points at it. Registration
/// needs the node pinned (`core::pin::pin!` or `Box::pin`), and the
/// node deregisters itself when dropped, on every exit path. A node that is
/// never registered costs nothing at drop time.
///
/// Derefs to the module, so owners keep using it directly.
///
/// Construction does not register: a node only joins transitions after
/// [`register`](Self::register), which needs a pinned address that `new`
/// cannot provide. Owners pin and register in the same place they build it:
///
/// ```
/// # use core::pin::pin;
/// # use deep_sleep::{GlobalNode, PowerAware};
/// # struct Led;
/// # impl PowerAware for Led {
/// #     fn enter_deep_sleep(&self) {}
/// #     fn exit_deep_sleep(&self) {}
/// # }
/// let led = pin!(GlobalNode::global(Led));
/// led.as_ref().register()?;
/// assert!(led.is_registered());
/// # Ok::<(), deep_sleep::RegisterError>(())
/// ```
pub struct PowerAwareNode<'c, T, M, const N: usize>
where
    T: PowerAware + 'static,
    M: RawMutex,
{
    module: T,
    coordinator: &'c DeepSleepCoordinator<M, N>,
    registered: Cell<bool>,
    _pinned: PhantomPinned,
}

impl<'c, T, M, const N: usize> PowerAwareNode<'c, T, M, N>
where
    T: PowerAware + 'static,
    M: RawMutex,
{
    /// Wrap `module` for registration with `coordinator`.
    #[must_use = "pin the node and register it, or its module never sees a transition"]
    pub const fn new(coordinator: &'c DeepSleepCoordinator<M, N>, module: T) -> Self {
        Self {
            module,
            coordinator,
            registered: Cell::new(false),
            _pinned: PhantomPinned,
        }
    }

    /// Add the module to the coordinator. From now on every transition visits
    /// it, after all modules registered before it.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::AlreadyRegistered`] on a second call
    /// - [`RegisterError::CoordinatorFull`] when no slot is left
    /// - [`RegisterError::TransitionInProgress`] from inside a callback
    pub fn register(self: Pin<&Self>) -> Result<(), RegisterError> {
        if self.registered.get() {
            return Err(RegisterError::AlreadyRegistered);
        }
        let node = self.get_ref();
        let module: NonNull<dyn PowerAware> = NonNull::from(&node.module);
        // SAFETY: the node is pinned and `!Unpin`, so its memory (and the
        // module inside it) stays put until `Drop` runs, and `Drop`
        // deregisters before the module is dropped. The node's own address
        // is the key; two live nodes cannot share it.
        unsafe {
            node.coordinator
                .register(NonNull::from(node).cast(), module)?;
        }
        node.registered.set(true);
        Ok(())
    }

    /// Remove the module from the coordinator. Once this returns, no
    /// transition visits it. Does nothing if it is not registered.
    ///
    /// Called automatically on drop.
    pub fn deregister(&self) {
        if self.registered.replace(false) {
            self.coordinator.deregister(NonNull::from(self).cast());
        }
    }

    /// Whether the module is currently in the coordinator's list.
    pub fn is_registered(&self) -> bool {
        self.registered.get()
    }

    /// The wrapped module.
    pub fn module(&self) -> &T {
        &self.module
    }
}

impl<T, M, const N: usize> Deref for PowerAwareNode<'_, T, M, N>
where
    T: PowerAware + 'static,
    M: RawMutex,
{
    type Target = T;

    fn deref(&self) -> &T {
        &self.module
    }
}

impl<T, M, const N: usize> Drop for PowerAwareNode<'_, T, M, N>
where
    T: PowerAware + 'static,
    M: RawMutex,
{
    fn drop(&mut self) {
        self.deregister();
    }
}
