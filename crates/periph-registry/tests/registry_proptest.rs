//! Property-based tests for descriptor tables.
//! Order preservation and index bounds must hold for ALL table contents.

#![allow(clippy::indexing_slicing)]

use periph_registry::{peripheral_ids, DescriptorTable, PeripheralId};

peripheral_ids! {
    pub enum Channel {
        Ch0, Ch1, Ch2, Ch3, Ch4, Ch5, Ch6, Ch7,
        Ch8, Ch9, Ch10, Ch11, Ch12, Ch13, Ch14, Ch15,
    }
}

fn leak_table(values: [u32; 16]) -> DescriptorTable<Channel, u32> {
    DescriptorTable::new(Box::leak(Box::new(values)))
}

proptest::proptest! {
    /// get(id) for every id in 0..N returns exactly the declared entries, in order.
    #[test]
    fn get_returns_declared_entries_in_order(values in proptest::array::uniform16(proptest::prelude::any::<u32>())) {
        let table = leak_table(values);
        for (position, id) in Channel::ALL.iter().enumerate() {
            proptest::prop_assert_eq!(*table.get(*id), values[position]);
        }
        let walked: Vec<u32> = table.iter().map(|(_, value)| *value).collect();
        proptest::prop_assert_eq!(walked, values.to_vec());
    }

    /// Raw indices inside 0..N resolve; indices at or past N never do.
    #[test]
    fn raw_index_bounds(index in 0usize..64) {
        let table = leak_table([0; 16]);
        if index < Channel::COUNT {
            proptest::prop_assert!(table.get_index(index).is_some());
            proptest::prop_assert_eq!(Channel::from_index(index).map(PeripheralId::index), Some(index));
        } else {
            proptest::prop_assert!(table.get_index(index).is_none());
            proptest::prop_assert!(Channel::from_index(index).is_none());
        }
    }

    /// TryFrom<u8> agrees with from_index for every byte.
    #[test]
    fn try_from_matches_from_index(raw in proptest::prelude::any::<u8>()) {
        let converted = Channel::try_from(raw).ok();
        proptest::prop_assert_eq!(converted, Channel::from_index(usize::from(raw)));
    }
}
