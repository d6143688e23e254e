//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cedra_tx_core::{Account, AccountAddress, RawTransaction, StructTag, TransactionPayload};

/// Generate a random account.
pub fn account() -> impl Strategy<Value = Account> {
    any::<[u8; 32]>().prop_map(|seed| Account::from_seed(&seed))
}

/// Generate a random address.
pub fn address() -> impl Strategy<Value = AccountAddress> {
    any::<[u8; 32]>().prop_map(AccountAddress::from_bytes)
}

/// Generate a Move identifier.
pub fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,31}".prop_map(String::from)
}

/// Generate a struct tag.
pub fn struct_tag() -> impl Strategy<Value = StructTag> {
    (address(), identifier(), "[A-Z][A-Za-z0-9]{0,31}")
        .prop_map(|(address, module, name)| StructTag::new(address, module, name))
}

/// Generate pre-encoded argument bytes.
pub fn argument(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate an entry-function payload with up to `max_args` arguments.
pub fn payload(max_args: usize) -> impl Strategy<Value = TransactionPayload> {
    (
        address(),
        identifier(),
        identifier(),
        prop::collection::vec(argument(200), 0..=max_args),
    )
        .prop_map(|(address, module, function, arguments)| TransactionPayload {
            module_address: address,
            module_name: module,
            function_name: function,
            arguments,
        })
}

/// Parameters for generating a signed-ready transaction.
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub account: Account,
    pub raw: RawTransaction,
}

impl Arbitrary for TransactionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            account(),
            any::<u64>(), // sequence number
            payload(4),
            1u64..=2_000_000u64,    // max gas
            0u64..=10_000u64,       // gas unit price
            any::<u64>(),           // expiration
            1u8..=u8::MAX,          // chain id
            struct_tag(),
        )
            .prop_map(
                |(account, seq, payload, max_gas, price, expiration, chain_id, fee_asset)| {
                    let raw = RawTransaction {
                        sender: account.address(),
                        sequence_number: seq,
                        payload,
                        max_gas_amount: max_gas,
                        gas_unit_price: price,
                        expiration_timestamp_secs: expiration,
                        chain_id,
                        fee_asset,
                    };
                    TransactionParams { account, raw }
                },
            )
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_encoding_deterministic(params: TransactionParams) {
            prop_assert_eq!(params.raw.encode(), params.raw.clone().encode());
        }

        #[test]
        fn test_signature_deterministic_and_valid(params: TransactionParams) {
            let s1 = params.raw.sign(&params.account).unwrap();
            let s2 = params.raw.sign(&params.account).unwrap();

            prop_assert_eq!(s1.to_bytes(), s2.to_bytes());
            prop_assert!(s1.verify().is_ok());
        }

        #[test]
        fn test_sequence_number_changes_bytes(params: TransactionParams) {
            let mut other = params.raw.clone();
            other.sequence_number = other.sequence_number.wrapping_add(1);
            prop_assert_ne!(params.raw.encode(), other.encode());
        }

        #[test]
        fn test_struct_tag_display_parses_back(tag in struct_tag()) {
            let parsed = StructTag::parse(&tag.to_string()).unwrap();
            prop_assert_eq!(parsed, tag);
        }

        #[test]
        fn test_address_hex_parses_back(addr in address()) {
            prop_assert_eq!(AccountAddress::from_hex(&addr.to_string()).unwrap(), addr);
        }
    }
}
