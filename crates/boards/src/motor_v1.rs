//! BLDC motor controller, revision 1 (STM32F446).
//!
//! Three half-bridge legs on TIM1's complementary outputs, Hall rotor
//! sensing on EXTI0..2, low-side shunt current sensing on ADC1 with DMA, and
//! a telemetry link on USART1.

use periph_registry::{
    clock_table, descriptor_table, peripheral_ids, Bus, ClockControl, ClockToken, Descriptor,
    DmaLink, Factory, Irq, PeripheralId,
};

use crate::config::{BoardInfo, MOTOR_V1};
use crate::drivers::HalfBridgeDriver;
use crate::families::{
    AdcDescriptor, AdcInit, CounterMode, CrcDescriptor, CrcInit, DmaChannelDescriptor,
    DmaChannelInit, DmaDirection, DmaPriority, Edge, ExtiDescriptor, ExtiInit, HalfBridgeInit,
    HallSensorInit, PhaseCurrentInit, Port, Resolution, TimerDescriptor, TimerInit,
    TransferWidth, UsartDescriptor, UsartInit,
};

/// Board identity.
pub const INFO: BoardInfo = MOTOR_V1;

// ── Identifiers ─────────────────────────────────────────────────────────────

peripheral_ids! {
    /// Timers.
    pub enum Timer {
        /// TIM1: centre-aligned complementary PWM for the bridge
        Tim1,
        /// TIM2: free-running 1 MHz commutation timebase
        Tim2,
    }
}

peripheral_ids! {
    /// Serial ports.
    pub enum Usart {
        /// USART2: debug console
        Console,
        /// USART1: telemetry link, DMA receive
        Telemetry,
    }
}

peripheral_ids! {
    /// Analog-to-digital converters.
    pub enum Adc {
        /// ADC1: phase currents, DMA driven
        Phase,
        /// ADC2: DC bus voltage and board temperature
        Supply,
    }
}

peripheral_ids! {
    /// DMA2 streams.
    pub enum Dma {
        /// Stream 0: ADC1 results
        AdcPhase,
        /// Stream 2: USART1 receive
        UsartRx,
    }
}

peripheral_ids! {
    /// External interrupt lines.
    pub enum Exti {
        /// Hall sensor A (PA0)
        HallA,
        /// Hall sensor B (PA1)
        HallB,
        /// Hall sensor C (PA2)
        HallC,
        /// Gate driver fault (PB12, active low)
        Fault,
    }
}

peripheral_ids! {
    /// CRC unit.
    pub enum Crc {
        /// Telemetry frame checksums
        Engine,
    }
}

peripheral_ids! {
    /// Half-bridge legs.
    pub enum HalfBridge {
        /// Phase U (TIM1 CH1/CH1N)
        U,
        /// Phase V (TIM1 CH2/CH2N)
        V,
        /// Phase W (TIM1 CH3/CH3N)
        W,
    }
}

peripheral_ids! {
    /// Hall rotor position sensors.
    pub enum HallSensor {
        /// The rotor's three-line sensor
        Rotor,
    }
}

peripheral_ids! {
    /// Shunt current sensors. W is reconstructed from U and V.
    pub enum PhaseCurrent {
        /// Phase U shunt (ADC1 IN0)
        U,
        /// Phase V shunt (ADC1 IN1)
        V,
    }
}

// ── Descriptors ─────────────────────────────────────────────────────────────

const ADC_STREAM: DmaLink = DmaLink {
    controller: 2,
    stream: 0,
    request: 0,
    irq: Some(Irq::new(56, 1)),
};

const USART_RX_STREAM: DmaLink = DmaLink {
    controller: 2,
    stream: 2,
    request: 4,
    irq: Some(Irq::new(58, 4)),
};

const HALL_EDGE_PRIORITY: u8 = 2;

descriptor_table! {
    Timer: TimerDescriptor {
        Tim1 => Descriptor::new(
            0x4001_0000,
            TimerInit { prescaler: 0, period: 4_499, mode: CounterMode::CenterAligned },
        )
        .with_irq(Irq::new(25, 1)),
        Tim2 => Descriptor::new(
            0x4000_0000,
            TimerInit { prescaler: 89, period: u32::MAX, mode: CounterMode::Up },
        )
        .with_irq(Irq::new(28, 3)),
    }
}

descriptor_table! {
    Usart: UsartDescriptor {
        Console => Descriptor::new(0x4000_4400, UsartInit::eight_n_one(115_200))
            .with_irq(Irq::new(38, 7)),
        Telemetry => Descriptor::new(0x4001_1000, UsartInit::eight_n_one(921_600))
            .with_irq(Irq::new(37, 4))
            .with_dma(USART_RX_STREAM),
    }
}

descriptor_table! {
    Adc: AdcDescriptor {
        Phase => Descriptor::new(
            0x4001_2000,
            AdcInit {
                resolution: Resolution::Bits12,
                channels: &[0, 1],
                sample_cycles: 3,
                continuous: false,
                dma_requests: false,
            },
        )
        .with_irq(Irq::new(18, 1))
        .with_dma(ADC_STREAM),
        Supply => Descriptor::new(
            0x4001_2100,
            AdcInit {
                resolution: Resolution::Bits12,
                channels: &[8, 16],
                sample_cycles: 144,
                continuous: false,
                dma_requests: false,
            },
        )
        .with_irq(Irq::new(18, 6)),
    }
}

descriptor_table! {
    Dma: DmaChannelDescriptor {
        AdcPhase => Descriptor::new(
            0x4002_6410,
            DmaChannelInit {
                direction: DmaDirection::PeripheralToMemory,
                priority: DmaPriority::VeryHigh,
                width: TransferWidth::HalfWord,
                circular: true,
            },
        ),
        UsartRx => Descriptor::new(
            0x4002_6440,
            DmaChannelInit {
                direction: DmaDirection::PeripheralToMemory,
                priority: DmaPriority::Medium,
                width: TransferWidth::Byte,
                circular: true,
            },
        ),
    }
}

descriptor_table! {
    Exti: ExtiDescriptor {
        HallA => Descriptor::new(0x4001_3C00, ExtiInit { line: 0, port: Port::A, edge: Edge::Both })
            .with_irq(Irq::new(6, HALL_EDGE_PRIORITY)),
        HallB => Descriptor::new(0x4001_3C00, ExtiInit { line: 1, port: Port::A, edge: Edge::Both })
            .with_irq(Irq::new(7, HALL_EDGE_PRIORITY)),
        HallC => Descriptor::new(0x4001_3C00, ExtiInit { line: 2, port: Port::A, edge: Edge::Both })
            .with_irq(Irq::new(8, HALL_EDGE_PRIORITY)),
        Fault => Descriptor::new(
            0x4001_3C00,
            ExtiInit { line: 12, port: Port::B, edge: Edge::Falling },
        )
        .with_irq(Irq::new(40, 0)),
    }
}

descriptor_table! {
    Crc: CrcDescriptor {
        Engine => Descriptor::new(0x4002_3000, CrcInit::CRC32),
    }
}

descriptor_table! {
    HalfBridge: HalfBridgeInit<Timer> {
        U => HalfBridgeInit { timer: Timer::Tim1, channel: 1, dead_time_ns: 400, max_duty: 4_275 },
        V => HalfBridgeInit { timer: Timer::Tim1, channel: 2, dead_time_ns: 400, max_duty: 4_275 },
        W => HalfBridgeInit { timer: Timer::Tim1, channel: 3, dead_time_ns: 400, max_duty: 4_275 },
    }
}

descriptor_table! {
    HallSensor: HallSensorInit<Exti> {
        Rotor => HallSensorInit { lines: [Exti::HallA, Exti::HallB, Exti::HallC], debounce_us: 2 },
    }
}

descriptor_table! {
    PhaseCurrent: PhaseCurrentInit<Adc> {
        U => PhaseCurrentInit { adc: Adc::Phase, channel: 0, shunt_milliohm: 5, gain: 20 },
        V => PhaseCurrentInit { adc: Adc::Phase, channel: 1, shunt_milliohm: 5, gain: 20 },
    }
}

// ── Clock gates ─────────────────────────────────────────────────────────────

/// DMA2EN in RCC_AHB1ENR; both streams share the controller clock.
const DMA2: ClockToken = ClockToken::new(Bus::Ahb1, 22);
/// SYSCFGEN in RCC_APB2ENR; the EXTI port mux lives in SYSCFG.
const SYSCFG: ClockToken = ClockToken::new(Bus::Apb2, 14);

clock_table! {
    Timer {
        Tim1 => ClockToken::new(Bus::Apb2, 0),
        Tim2 => ClockToken::new(Bus::Apb1, 0),
    }
}

clock_table! {
    Usart {
        Console => ClockToken::new(Bus::Apb1, 17),
        Telemetry => ClockToken::new(Bus::Apb2, 4),
    }
}

clock_table! {
    Adc {
        Phase => ClockToken::new(Bus::Apb2, 8),
        Supply => ClockToken::new(Bus::Apb2, 9),
    }
}

clock_table! {
    Dma {
        AdcPhase => DMA2,
        UsartRx => DMA2,
    }
}

clock_table! {
    Exti {
        HallA => SYSCFG,
        HallB => SYSCFG,
        HallC => SYSCFG,
        Fault => SYSCFG,
    }
}

clock_table! {
    Crc {
        Engine => ClockToken::new(Bus::Ahb1, 12),
    }
}

// ── Bring-up ────────────────────────────────────────────────────────────────

/// Enable every bus clock the board uses: DMA and CRC first, then the
/// EXTI mux, timers, serial ports and ADCs. Returns the number of tokens
/// applied.
pub fn enable_clocks(control: &mut impl ClockControl) -> usize {
    #[cfg(feature = "defmt")]
    defmt::info!("{=str}: enabling peripheral clocks", INFO.name);
    [
        periph_registry::enable_clocks::<Dma>(control),
        periph_registry::enable_clocks::<Crc>(control),
        periph_registry::enable_clocks::<Exti>(control),
        periph_registry::enable_clocks::<Timer>(control),
        periph_registry::enable_clocks::<Usart>(control),
        periph_registry::enable_clocks::<Adc>(control),
    ]
    .iter()
    .sum()
}

/// Power-aware driver for one bridge leg, named after the leg.
pub fn bridge_driver(leg: HalfBridge) -> HalfBridgeDriver {
    HalfBridgeDriver::new(leg.name(), leg.descriptor())
}
