//! Registry lookup tests: identifier ↔ descriptor correspondence, clock
//! tables, DMA variants and fail-fast behaviour.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use periph_registry::{
    clock_table, descriptor_table, disable_clocks, enable_clocks, get, get_clock, get_for_dma,
    peripheral_ids, Bus, ClockControl, ClockGated, ClockToken, Descriptor, DmaLink, DmaMode,
    Factory, Irq, PeripheralId,
};

// ── Two-timer board ──────────────────────────────────────────────────────────

/// Timer init bundle for the test board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerInit {
    /// Counter clock divider minus one
    pub prescaler: u16,
    /// Auto-reload value
    pub period: u32,
}

peripheral_ids! {
    /// Timers on the test board.
    pub enum Timer {
        /// Advanced timer on APB2
        A,
        /// General-purpose timer on APB1
        B,
    }
}

const DESC_A: Descriptor<TimerInit> = Descriptor::new(
    0x4001_0000,
    TimerInit {
        prescaler: 0,
        period: 4_199,
    },
);
const DESC_B: Descriptor<TimerInit> = Descriptor::new(
    0x4000_0400,
    TimerInit {
        prescaler: 83,
        period: 999,
    },
)
.with_irq(Irq::new(29, 5));

descriptor_table! {
    Timer: Descriptor<TimerInit> {
        A => DESC_A,
        B => DESC_B,
    }
}

clock_table! {
    Timer {
        A => ClockToken::new(Bus::Apb2, 0),
        B => ClockToken::new(Bus::Apb1, 1),
    }
}

#[test]
fn timer_scenario_get_a_is_desc_a() {
    assert_eq!(*get(Timer::A), DESC_A);
}

#[test]
fn timer_scenario_get_b_is_desc_b() {
    assert_eq!(*get(Timer::B), DESC_B);
}

#[test]
fn timer_scenario_size_is_not_an_identifier() {
    // The sentinel index (COUNT) is one past the last entry and maps to nothing.
    assert_eq!(Timer::COUNT, 2);
    assert_eq!(Timer::from_index(Timer::COUNT), None);
    assert!(Timer::try_from(2u8).is_err());
    assert!(Timer::descriptors().get_index(Timer::COUNT).is_none());
}

#[test]
fn every_identifier_has_a_distinct_descriptor() {
    let a: *const _ = get(Timer::A);
    let b: *const _ = get(Timer::B);
    assert_ne!(a, b);
    assert_ne!(get(Timer::A), get(Timer::B));
}

#[test]
fn lookups_return_the_same_static_value() {
    assert!(core::ptr::eq(get(Timer::B), Timer::B.descriptor()));
    assert!(core::ptr::eq(get(Timer::B), Timer::descriptors().get(Timer::B)));
}

#[test]
fn clock_table_is_parallel_to_descriptor_table() {
    assert_eq!(Timer::clocks().len(), Timer::descriptors().len());
    assert_eq!(get_clock(Timer::A), ClockToken::new(Bus::Apb2, 0));
    assert_eq!(Timer::B.clock(), ClockToken::new(Bus::Apb1, 1));
}

#[test]
fn raw_identifier_round_trips_through_try_from() {
    let id = Timer::try_from(1u8).unwrap();
    assert_eq!(*get(id), DESC_B);
}

// ── Clock bring-up ───────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingRcc {
    enabled: Vec<ClockToken>,
    disabled: Vec<ClockToken>,
}

impl ClockControl for RecordingRcc {
    fn enable(&mut self, token: ClockToken) {
        self.enabled.push(token);
    }

    fn disable(&mut self, token: ClockToken) {
        self.disabled.push(token);
    }
}

#[test]
fn enable_clocks_walks_identifier_order() {
    let mut rcc = RecordingRcc::default();
    let applied = enable_clocks::<Timer>(&mut rcc);
    assert_eq!(applied, 2);
    assert_eq!(
        rcc.enabled,
        vec![ClockToken::new(Bus::Apb2, 0), ClockToken::new(Bus::Apb1, 1)]
    );
}

#[test]
fn disable_clocks_walks_reverse_order() {
    let mut rcc = RecordingRcc::default();
    disable_clocks::<Timer>(&mut rcc);
    assert_eq!(
        rcc.disabled,
        vec![ClockToken::new(Bus::Apb1, 1), ClockToken::new(Bus::Apb2, 0)]
    );
}

// ── ADC with DMA ─────────────────────────────────────────────────────────────

/// ADC init bundle; the DMA variant converts continuously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcInit {
    /// Restart conversion after each sequence
    pub continuous: bool,
    /// Issue a DMA request per conversion
    pub dma_requests: bool,
}

impl DmaMode for AdcInit {
    fn for_dma(self) -> Self {
        Self {
            continuous: true,
            dma_requests: true,
        }
    }
}

peripheral_ids! {
    /// ADC inputs on the test board.
    pub enum Adc {
        /// Phase current, DMA streamed
        Current,
        /// Battery voltage, polled
        Battery,
    }
}

const ADC_STREAM: DmaLink = DmaLink {
    controller: 2,
    stream: 0,
    request: 0,
    irq: Some(Irq::new(56, 2)),
};

descriptor_table! {
    Adc: Descriptor<AdcInit> {
        Current => Descriptor::new(0x4001_2000, AdcInit { continuous: false, dma_requests: false })
            .with_irq(Irq::new(18, 2))
            .with_dma(ADC_STREAM),
        Battery => Descriptor::new(0x4001_2100, AdcInit { continuous: false, dma_requests: false })
            .with_irq(Irq::new(18, 6)),
    }
}

#[test]
fn get_for_dma_adapts_linked_adc() {
    let dma = get_for_dma(Adc::Current);
    assert_eq!(dma.base, get(Adc::Current).base);
    assert!(dma.init.dma_requests);
    assert!(dma.init.continuous);
    assert_eq!(dma.irq, ADC_STREAM.irq, "stream interrupt replaces EOC interrupt");
    assert_eq!(dma.dma, Some(ADC_STREAM));
}

#[test]
fn get_for_dma_leaves_table_untouched() {
    let _ = get_for_dma(Adc::Current);
    assert!(!get(Adc::Current).init.dma_requests);
}

#[test]
#[should_panic(expected = "Adc::Battery has no DMA link")]
fn get_for_dma_without_link_halts() {
    let _ = get_for_dma(Adc::Battery);
}
