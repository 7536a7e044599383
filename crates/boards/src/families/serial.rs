//! Serial buses: I2C, SPI, USART.

use periph_registry::{Descriptor, DmaMode};

/// I2C controller descriptor.
pub type I2cDescriptor = Descriptor<I2cInit>;
/// SPI controller descriptor.
pub type SpiDescriptor = Descriptor<SpiInit>;
/// USART descriptor.
pub type UsartDescriptor = Descriptor<UsartInit>;

/// I2C controller parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cInit {
    /// SCL frequency in Hz
    pub frequency: u32,
    /// Addressing mode
    pub address_mode: AddressMode,
}

/// I2C addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    /// 7-bit addressing
    SevenBit,
    /// 10-bit addressing
    TenBit,
}

/// SPI controller parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiInit {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// SPI mode (CPOL, CPHA)
    pub mode: SpiMode,
    /// Bit order
    pub bit_order: BitOrder,
    /// Transfers go through the linked DMA stream
    pub dma: bool,
}

/// SPI modes (CPOL, CPHA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

/// Bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

impl DmaMode for SpiInit {
    fn for_dma(self) -> Self {
        Self { dma: true, ..self }
    }
}

/// USART parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsartInit {
    /// Baud rate
    pub baud_rate: u32,
    /// Data bits
    pub data_bits: DataBits,
    /// Parity
    pub parity: Parity,
    /// Stop bits
    pub stop_bits: StopBits,
    /// Receive into a circular DMA buffer instead of per-byte interrupts
    pub rx_dma: bool,
}

impl UsartInit {
    /// 8N1 at `baud_rate`, interrupt-driven.
    pub const fn eight_n_one(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            rx_dma: false,
        }
    }
}

impl DmaMode for UsartInit {
    fn for_dma(self) -> Self {
        Self {
            rx_dma: true,
            ..self
        }
    }
}

/// Data bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    /// 7 data bits
    Seven,
    /// 8 data bits
    Eight,
    /// 9 data bits
    Nine,
}

/// Parity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    /// No parity
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// Stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    /// 1 stop bit
    One,
    /// 2 stop bits
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_n_one_framing() {
        let init = UsartInit::eight_n_one(115_200);
        assert_eq!(init.data_bits, DataBits::Eight);
        assert_eq!(init.parity, Parity::None);
        assert_eq!(init.stop_bits, StopBits::One);
        assert!(!init.rx_dma);
    }

    #[test]
    fn dma_mode_only_touches_dma_flag() {
        let init = UsartInit::eight_n_one(9_600);
        assert_eq!(
            init.for_dma(),
            UsartInit {
                rx_dma: true,
                ..init
            }
        );
    }
}
