use proptest::prelude::*;

use poaforge_genesis::{ExtraData, GenesisDocument, GenesisParams};
use poaforge_types::{Address, WeiAmount};

fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::new)
}

proptest! {
    /// extraData length is always 32 + 20*N + 65.
    #[test]
    fn extra_data_length_law(addresses in prop::collection::vec(arb_address(), 0..64)) {
        let extra = ExtraData::encode(&addresses);
        prop_assert_eq!(extra.len(), 32 + 20 * addresses.len() + 65);
    }

    /// Each address occupies its designated slot, in generation order.
    #[test]
    fn extra_data_offset_law(addresses in prop::collection::vec(arb_address(), 0..64)) {
        let extra = ExtraData::encode(&addresses);
        for (i, address) in addresses.iter().enumerate() {
            let start = 32 + 20 * i;
            prop_assert_eq!(&extra.as_bytes()[start..start + 20], address.as_bytes().as_slice());
        }
    }

    /// Decoding recovers exactly the encoded set, duplicates included.
    #[test]
    fn extra_data_decode_inverts_encode(addresses in prop::collection::vec(arb_address(), 0..64)) {
        let extra = ExtraData::encode(&addresses);
        prop_assert_eq!(extra.validators().unwrap(), addresses);
    }

    /// Vanity and seal regions stay zeroed regardless of the validator set.
    #[test]
    fn extra_data_padding_is_zero(addresses in prop::collection::vec(arb_address(), 0..64)) {
        let extra = ExtraData::encode(&addresses);
        let bytes = extra.as_bytes();
        prop_assert!(bytes[..32].iter().all(|&b| b == 0));
        prop_assert!(bytes[bytes.len() - 65..].iter().all(|&b| b == 0));
    }

    /// The JSON wire format round-trips the whole document.
    #[test]
    fn genesis_json_roundtrip(
        addresses in prop::collection::vec(arb_address(), 1..16),
        chain_id in 1u64..1_000_000,
        period in 0u64..3600,
        balance_eth in 1u128..2_000_000_000,
    ) {
        let params = GenesisParams {
            chain_id,
            period,
            gas_limit: 0x1000000,
            initial_balance: WeiAmount::from_eth(balance_eth).unwrap(),
        };
        let doc = GenesisDocument::build(&params, &addresses, ExtraData::encode(&addresses));
        let parsed = GenesisDocument::from_json(&doc.to_json().unwrap()).unwrap();
        prop_assert_eq!(parsed, doc);
    }
}
