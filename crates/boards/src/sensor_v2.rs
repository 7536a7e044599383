//! Low-power sensor node, revision 2 (STM32F413).
//!
//! Environmental sensors and an EEPROM on two I2C buses, a sub-GHz radio on
//! SPI1 with DMA, battery monitoring on ADC1, a bias DAC and a TIM6 sampling
//! timebase. The RTC wakes the node from deep sleep.

use periph_registry::{
    clock_table, descriptor_table, peripheral_ids, Bus, ClockControl, ClockToken, Descriptor,
    DmaLink, Factory, Irq,
};

use crate::config::{BoardInfo, SENSOR_V2};
use crate::drivers::RtcKeeper;
use crate::families::{
    AdcDescriptor, AdcInit, AddressMode, BitOrder, CounterMode, DacDescriptor, DacInit,
    DacTrigger, DmaChannelDescriptor, DmaChannelInit, DmaDirection, DmaPriority, Edge,
    ExtiDescriptor, ExtiInit, I2cDescriptor, I2cInit, Port, Resolution, RtcClock, RtcDescriptor,
    RtcInit, SpiDescriptor, SpiInit, SpiMode, TimerDescriptor, TimerInit, TransferWidth,
    UsartDescriptor, UsartInit,
};

/// Board identity.
pub const INFO: BoardInfo = SENSOR_V2;

peripheral_ids! {
    /// I2C buses.
    pub enum I2c {
        /// I2C1: temperature, humidity and pressure sensors
        Sensors,
        /// I2C2: configuration EEPROM
        Eeprom,
    }
}

peripheral_ids! {
    /// SPI controllers.
    pub enum Spi {
        /// SPI1: sub-GHz radio, DMA transmit
        Radio,
    }
}

peripheral_ids! {
    /// Serial ports.
    pub enum Usart {
        /// USART2: debug console
        Console,
    }
}

peripheral_ids! {
    /// Analog-to-digital converter inputs.
    pub enum Adc {
        /// Battery divider, DMA averaged
        Battery,
        /// Ambient light photodiode
        Light,
    }
}

peripheral_ids! {
    /// Digital-to-analog converter channels.
    pub enum Dac {
        /// Photodiode bias
        Bias,
    }
}

peripheral_ids! {
    /// Real-time clock.
    pub enum Rtc {
        /// Calendar and periodic wake-up
        Wakeup,
    }
}

peripheral_ids! {
    /// Timers.
    pub enum Timer {
        /// TIM6: 10 Hz sensor sampling
        Sampling,
    }
}

peripheral_ids! {
    /// DMA2 streams.
    pub enum Dma {
        /// Stream 0: ADC1 results
        AdcBattery,
        /// Stream 3: SPI1 transmit
        SpiTx,
    }
}

peripheral_ids! {
    /// External interrupt lines.
    pub enum Exti {
        /// Radio packet interrupt (PB0)
        RadioIrq,
        /// User button (PC13)
        Button,
    }
}

const ADC_STREAM: DmaLink = DmaLink {
    controller: 2,
    stream: 0,
    request: 0,
    irq: Some(Irq::new(56, 5)),
};

const SPI_TX_STREAM: DmaLink = DmaLink {
    controller: 2,
    stream: 3,
    request: 3,
    irq: Some(Irq::new(59, 3)),
};

const ENV_I2C: I2cInit = I2cInit {
    frequency: 100_000,
    address_mode: AddressMode::SevenBit,
};

descriptor_table! {
    I2c: I2cDescriptor {
        Sensors => Descriptor::new(0x4000_5400, ENV_I2C).with_irq(Irq::new(31, 6)),
        Eeprom => Descriptor::new(0x4000_5800, I2cInit { frequency: 400_000, ..ENV_I2C })
            .with_irq(Irq::new(33, 6)),
    }
}

descriptor_table! {
    Spi: SpiDescriptor {
        Radio => Descriptor::new(
            0x4001_3000,
            SpiInit {
                frequency: 8_000_000,
                mode: SpiMode::Mode0,
                bit_order: BitOrder::MsbFirst,
                dma: false,
            },
        )
        .with_irq(Irq::new(35, 3))
        .with_dma(SPI_TX_STREAM),
    }
}

descriptor_table! {
    Usart: UsartDescriptor {
        Console => Descriptor::new(0x4000_4400, UsartInit::eight_n_one(115_200))
            .with_irq(Irq::new(38, 7)),
    }
}

descriptor_table! {
    Adc: AdcDescriptor {
        Battery => Descriptor::new(
            0x4001_2000,
            AdcInit {
                resolution: Resolution::Bits12,
                channels: &[4],
                sample_cycles: 480,
                continuous: false,
                dma_requests: false,
            },
        )
        .with_irq(Irq::new(18, 5))
        .with_dma(ADC_STREAM),
        Light => Descriptor::new(
            0x4001_2000,
            AdcInit {
                resolution: Resolution::Bits10,
                channels: &[5],
                sample_cycles: 84,
                continuous: false,
                dma_requests: false,
            },
        )
        .with_irq(Irq::new(18, 5)),
    }
}

descriptor_table! {
    Dac: DacDescriptor {
        Bias => Descriptor::new(
            0x4000_7400,
            DacInit { channel: 1, output_buffer: true, trigger: DacTrigger::Software },
        ),
    }
}

descriptor_table! {
    Rtc: RtcDescriptor {
        Wakeup => Descriptor::new(
            0x4000_2800,
            RtcInit {
                clock: RtcClock::Lse,
                async_prescaler: 127,
                sync_prescaler: 255,
                wakeup_seconds: 60,
            },
        )
        .with_irq(Irq::new(3, 1)),
    }
}

descriptor_table! {
    Timer: TimerDescriptor {
        Sampling => Descriptor::new(
            0x4000_1000,
            TimerInit { prescaler: 8_399, period: 999, mode: CounterMode::Up },
        )
        .with_irq(Irq::new(54, 6)),
    }
}

descriptor_table! {
    Dma: DmaChannelDescriptor {
        AdcBattery => Descriptor::new(
            0x4002_6410,
            DmaChannelInit {
                direction: DmaDirection::PeripheralToMemory,
                priority: DmaPriority::Low,
                width: TransferWidth::HalfWord,
                circular: true,
            },
        ),
        SpiTx => Descriptor::new(
            0x4002_6458,
            DmaChannelInit {
                direction: DmaDirection::MemoryToPeripheral,
                priority: DmaPriority::High,
                width: TransferWidth::Byte,
                circular: false,
            },
        ),
    }
}

descriptor_table! {
    Exti: ExtiDescriptor {
        RadioIrq => Descriptor::new(0x4001_3C00, ExtiInit { line: 0, port: Port::B, edge: Edge::Rising })
            .with_irq(Irq::new(6, 2)),
        Button => Descriptor::new(
            0x4001_3C00,
            ExtiInit { line: 13, port: Port::C, edge: Edge::Falling },
        )
        .with_irq(Irq::new(40, 8)),
    }
}

/// SYSCFGEN in RCC_APB2ENR; the EXTI port mux lives in SYSCFG.
const SYSCFG: ClockToken = ClockToken::new(Bus::Apb2, 14);
/// DMA2EN in RCC_AHB1ENR.
const DMA2: ClockToken = ClockToken::new(Bus::Ahb1, 22);
/// ADC1EN; both inputs are channels of the same converter.
const ADC1: ClockToken = ClockToken::new(Bus::Apb2, 8);

clock_table! {
    I2c {
        Sensors => ClockToken::new(Bus::Apb1, 21),
        Eeprom => ClockToken::new(Bus::Apb1, 22),
    }
}

clock_table! {
    Spi {
        Radio => ClockToken::new(Bus::Apb2, 12),
    }
}

clock_table! {
    Usart {
        Console => ClockToken::new(Bus::Apb1, 17),
    }
}

clock_table! {
    Adc {
        Battery => ADC1,
        Light => ADC1,
    }
}

clock_table! {
    Dac {
        Bias => ClockToken::new(Bus::Apb1, 29),
    }
}

clock_table! {
    Rtc {
        Wakeup => ClockToken::new(Bus::Backup, 15),
    }
}

clock_table! {
    Timer {
        Sampling => ClockToken::new(Bus::Apb1, 4),
    }
}

clock_table! {
    Dma {
        AdcBattery => DMA2,
        SpiTx => DMA2,
    }
}

clock_table! {
    Exti {
        RadioIrq => SYSCFG,
        Button => SYSCFG,
    }
}

/// Enable every bus clock the board uses, backup domain first so the RTC
/// keeps time across the rest of bring-up. Returns the number of tokens
/// applied.
pub fn enable_clocks(control: &mut impl ClockControl) -> usize {
    #[cfg(feature = "defmt")]
    defmt::info!("{=str}: enabling peripheral clocks", INFO.name);
    [
        periph_registry::enable_clocks::<Rtc>(control),
        periph_registry::enable_clocks::<Dma>(control),
        periph_registry::enable_clocks::<Exti>(control),
        periph_registry::enable_clocks::<Timer>(control),
        periph_registry::enable_clocks::<I2c>(control),
        periph_registry::enable_clocks::<Spi>(control),
        periph_registry::enable_clocks::<Usart>(control),
        periph_registry::enable_clocks::<Adc>(control),
        periph_registry::enable_clocks::<Dac>(control),
    ]
    .iter()
    .sum()
}

/// Power-aware keeper for the board's RTC.
pub fn rtc_keeper() -> RtcKeeper {
    RtcKeeper::new(&Rtc::Wakeup.descriptor().init)
}
