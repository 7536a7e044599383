//! Generic peripheral descriptor.
//!
//! A descriptor is everything bring-up code needs to program one peripheral
//! instance: where its registers live, the init parameter bundle, and how the
//! instance is wired to the interrupt controller and DMA. The init bundle is
//! opaque to the registry; each peripheral family supplies its own.

/// Peripheral register block base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct BaseAddress(u32);

impl BaseAddress {
    /// Wrap a raw register block address.
    #[must_use]
    pub const fn new(address: u32) -> Self {
        Self(address)
    }

    /// Raw address.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Interrupt routing for one peripheral instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Irq {
    /// NVIC interrupt number.
    pub number: u16,
    /// Preemption priority (lower is more urgent).
    pub priority: u8,
}

impl Irq {
    /// Route to interrupt `number` at `priority`.
    #[must_use]
    pub const fn new(number: u16, priority: u8) -> Self {
        Self { number, priority }
    }
}

/// DMA stream a peripheral instance is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaLink {
    /// DMA controller (1 or 2 on most parts).
    pub controller: u8,
    /// Stream within the controller.
    pub stream: u8,
    /// Request line (channel select) the peripheral raises.
    pub request: u8,
    /// Transfer-complete interrupt of the stream, when the stream signals
    /// completion instead of the peripheral.
    pub irq: Option<Irq>,
}

/// Immutable initialization descriptor for one peripheral instance.
///
/// `P` is the family's init parameter bundle (timer prescalers, UART framing,
/// ADC channel sequence, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Descriptor<P> {
    /// Register block of the instance.
    pub base: BaseAddress,
    /// Family-specific init parameters.
    pub init: P,
    /// Interrupt routing, if the instance uses interrupts.
    pub irq: Option<Irq>,
    /// DMA linkage, if the instance can be serviced by DMA.
    pub dma: Option<DmaLink>,
}

impl<P> Descriptor<P> {
    /// Descriptor without interrupt or DMA wiring.
    #[must_use]
    pub const fn new(base: u32, init: P) -> Self {
        Self {
            base: BaseAddress::new(base),
            init,
            irq: None,
            dma: None,
        }
    }

    /// Same descriptor routed to `irq`.
    #[must_use]
    pub const fn with_irq(self, irq: Irq) -> Self
    where
        P: Copy,
    {
        Self {
            irq: Some(irq),
            ..self
        }
    }

    /// Same descriptor linked to a DMA stream.
    #[must_use]
    pub const fn with_dma(self, dma: DmaLink) -> Self
    where
        P: Copy,
    {
        Self {
            dma: Some(dma),
            ..self
        }
    }
}

/// Init bundles that have a distinct DMA-driven configuration.
pub trait DmaMode: Copy {
    /// Init parameters adjusted so the peripheral raises DMA requests instead
    /// of relying on per-conversion interrupts.
    #[must_use]
    fn for_dma(self) -> Self;
}

impl<P: DmaMode> Descriptor<P> {
    /// DMA-driven variant of this descriptor, or `None` when the instance has
    /// no DMA linkage.
    ///
    /// The init bundle is switched to its DMA mode and interrupt routing is
    /// taken over by the DMA stream: the stream's completion interrupt
    /// replaces the peripheral's own.
    #[must_use]
    pub fn for_dma(&self) -> Option<Self> {
        let dma = self.dma?;
        Some(Self {
            base: self.base,
            init: self.init.for_dma(),
            irq: dma.irq,
            dma: Some(dma),
        })
    }
}
