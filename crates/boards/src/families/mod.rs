//! Init parameter bundles, one per peripheral family.
//!
//! Each family pairs its bundle with a descriptor alias
//! (`TimerDescriptor = Descriptor<TimerInit>`, ...). Composite families in
//! [`motor`] have no register block of their own; their descriptor is the
//! bundle itself, which names the underlying instances by identifier.

pub mod analog;
pub mod motor;
pub mod serial;
pub mod system;
pub mod timing;

pub use analog::{AdcDescriptor, AdcInit, DacDescriptor, DacInit, DacTrigger, Resolution};
pub use motor::{commutation_step, HalfBridgeInit, HallSensorInit, PhaseCurrentInit};
pub use serial::{
    AddressMode, BitOrder, DataBits, I2cDescriptor, I2cInit, Parity, SpiDescriptor, SpiInit,
    SpiMode, StopBits, UsartDescriptor, UsartInit,
};
pub use system::{
    CrcDescriptor, CrcInit, DmaChannelDescriptor, DmaChannelInit, DmaDirection, DmaPriority,
    Edge, ExtiDescriptor, ExtiInit, Port, TransferWidth,
};
pub use timing::{CounterMode, RtcClock, RtcDescriptor, RtcInit, TimerDescriptor, TimerInit};
