//! Composite motor-control peripherals.
//!
//! A composite is built from plain instances of other kinds and names them by
//! identifier, so the identifier types are parameters: `HalfBridgeInit<Timer>`
//! only accepts identifiers of the board's own `Timer` kind. Composites have
//! no bus clock of their own; enabling the underlying kinds is enough.

/// One half-bridge leg driven by a complementary PWM channel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HalfBridgeInit<T> {
    /// Advanced timer producing the PWM pair
    pub timer: T,
    /// Timer output channel (1..=4)
    pub channel: u8,
    /// Dead time inserted between high- and low-side switching, in ns
    pub dead_time_ns: u16,
    /// Duty ceiling, in timer counts; keeps bootstrap capacitors charged
    pub max_duty: u16,
}

/// Three-line Hall-effect rotor position sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HallSensorInit<E> {
    /// EXTI lines for sensors A, B, C
    pub lines: [E; 3],
    /// Input glitch filter, in µs
    pub debounce_us: u16,
}

/// Commutation step (0..=5) for sampled Hall levels `[a, b, c]`, or `None`
/// for the two states a healthy sensor never reports.
pub fn commutation_step(levels: [bool; 3]) -> Option<u8> {
    match levels {
        [true, false, false] => Some(0),
        [true, true, false] => Some(1),
        [false, true, false] => Some(2),
        [false, true, true] => Some(3),
        [false, false, true] => Some(4),
        [true, false, true] => Some(5),
        _ => None,
    }
}

/// Phase current measured across a low-side shunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseCurrentInit<A> {
    /// ADC sampling the amplified shunt voltage
    pub adc: A,
    /// ADC input channel
    pub channel: u8,
    /// Shunt resistance, in mΩ
    pub shunt_milliohm: u16,
    /// Amplifier gain
    pub gain: u16,
}

impl<A> PhaseCurrentInit<A> {
    /// Current in mA for a shunt-amplifier output of `millivolts`.
    ///
    /// `None` for a zero shunt or gain.
    pub fn milliamps(&self, millivolts: u32) -> Option<u32> {
        let scale = u32::from(self.shunt_milliohm).checked_mul(u32::from(self.gain))?;
        millivolts.checked_mul(1_000)?.checked_div(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hall_sequence_walks_all_six_steps() {
        let sequence = [
            [true, false, false],
            [true, true, false],
            [false, true, false],
            [false, true, true],
            [false, false, true],
            [true, false, true],
        ];
        for (expected, levels) in (0u8..).zip(sequence) {
            assert_eq!(commutation_step(levels), Some(expected));
        }
        assert_eq!(commutation_step([false; 3]), None);
        assert_eq!(commutation_step([true; 3]), None);
    }

    #[test]
    fn milliamps_from_shunt_voltage() {
        let sense = PhaseCurrentInit {
            adc: (),
            channel: 0,
            shunt_milliohm: 5,
            gain: 20,
        };
        assert_eq!(sense.milliamps(1_650), Some(16_500));
        assert_eq!(PhaseCurrentInit { gain: 0, ..sense }.milliamps(1_650), None);
    }
}
