//! System blocks: DMA streams, CRC unit, external interrupt lines.

use periph_registry::Descriptor;

/// DMA stream descriptor.
pub type DmaChannelDescriptor = Descriptor<DmaChannelInit>;
/// CRC unit descriptor.
pub type CrcDescriptor = Descriptor<CrcInit>;
/// EXTI line descriptor.
pub type ExtiDescriptor = Descriptor<ExtiInit>;

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaDirection {
    /// Peripheral data register to memory
    PeripheralToMemory,
    /// Memory to peripheral data register
    MemoryToPeripheral,
    /// Memory to memory (DMA2 only)
    MemoryToMemory,
}

/// Stream arbitration priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaPriority {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
    /// Very high
    VeryHigh,
}

/// Transfer element width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferWidth {
    /// 8 bits
    Byte,
    /// 16 bits
    HalfWord,
    /// 32 bits
    Word,
}

/// DMA stream parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaChannelInit {
    /// Transfer direction
    pub direction: DmaDirection,
    /// Arbitration priority
    pub priority: DmaPriority,
    /// Element width on both sides
    pub width: TransferWidth,
    /// Restart at the buffer start when the count reaches zero
    pub circular: bool,
}

/// CRC unit parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrcInit {
    /// Generator polynomial (normal form)
    pub polynomial: u32,
    /// Initial remainder
    pub initial: u32,
}

impl CrcInit {
    /// CRC-32 (Ethernet) as computed by the fixed-function unit.
    pub const CRC32: Self = Self {
        polynomial: 0x04C1_1DB7,
        initial: 0xFFFF_FFFF,
    };
}

/// GPIO port an EXTI line is muxed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// GPIOA
    A,
    /// GPIOB
    B,
    /// GPIOC
    C,
    /// GPIOH
    H,
}

/// Edge that fires the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Rising edge
    Rising,
    /// Falling edge
    Falling,
    /// Both edges
    Both,
}

/// EXTI line parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtiInit {
    /// Line number, equal to the pin number (0..=15)
    pub line: u8,
    /// Port the line is muxed to
    pub port: Port,
    /// Trigger edge
    pub edge: Edge,
}
