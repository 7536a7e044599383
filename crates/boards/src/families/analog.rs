//! Analog converters: ADC and DAC.

use periph_registry::{Descriptor, DmaMode};

/// ADC descriptor.
pub type AdcDescriptor = Descriptor<AdcInit>;
/// DAC descriptor.
pub type DacDescriptor = Descriptor<DacInit>;

/// ADC conversion resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 12-bit
    Bits12,
    /// 10-bit
    Bits10,
    /// 8-bit
    Bits8,
}

impl Resolution {
    /// Largest conversion result.
    pub const fn full_scale(self) -> u16 {
        match self {
            Self::Bits12 => 0x0FFF,
            Self::Bits10 => 0x03FF,
            Self::Bits8 => 0x00FF,
        }
    }
}

/// ADC parameters.
///
/// In interrupt mode the ADC converts the sequence once per trigger and
/// raises end-of-conversion. In DMA mode ([`DmaMode::for_dma`]) it converts
/// continuously and hands each result to the linked stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcInit {
    /// Conversion resolution
    pub resolution: Resolution,
    /// Regular sequence, in conversion order
    pub channels: &'static [u8],
    /// Sampling time in ADC clock cycles
    pub sample_cycles: u16,
    /// Restart the sequence after it completes
    pub continuous: bool,
    /// Issue a DMA request per conversion
    pub dma_requests: bool,
}

impl DmaMode for AdcInit {
    fn for_dma(self) -> Self {
        Self {
            continuous: true,
            dma_requests: true,
            ..self
        }
    }
}

/// What starts a DAC conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacTrigger {
    /// Write to the data register
    Software,
    /// TIM6 update event
    Tim6,
    /// TIM7 update event
    Tim7,
}

/// DAC channel parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacInit {
    /// Output channel (1 or 2)
    pub channel: u8,
    /// Drive the pin through the output buffer
    pub output_buffer: bool,
    /// Conversion trigger
    pub trigger: DacTrigger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dma_mode_converts_continuously() {
        let init = AdcInit {
            resolution: Resolution::Bits12,
            channels: &[0, 1],
            sample_cycles: 15,
            continuous: false,
            dma_requests: false,
        };
        let dma = init.for_dma();
        assert!(dma.continuous);
        assert!(dma.dma_requests);
        assert_eq!(dma.channels, init.channels);
    }

    #[test]
    fn full_scale_per_resolution() {
        assert_eq!(Resolution::Bits12.full_scale(), 4095);
        assert_eq!(Resolution::Bits8.full_scale(), 255);
    }
}
