//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the canonical encoding, the Ed25519 signature over the
//! salted signing message, and the committed-transaction hash. Any
//! implementation must reproduce them byte for byte.

use cedra_tx_core::{
    Account, AccountAddress, RawTransaction, SignedTransaction, StructTag, TransactionPayload,
};

/// A golden transfer transaction.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Sender private key (hex, no prefix).
    pub private_key: &'static str,
    pub receiver: &'static str,
    pub amount: u64,
    pub sequence_number: u64,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
    pub fee_asset: &'static str,
    /// Expected sender address (hex).
    pub expected_sender: &'static str,
    /// Expected `RawTransaction::encode` output (hex).
    pub expected_raw: &'static str,
    /// Expected signature (hex).
    pub expected_signature: &'static str,
    /// Expected `SignedTransaction::hash`.
    pub expected_hash: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "testnet transfer of 1 CED",
            private_key: "1b542690da83a0c3507e9e8c6ac03be689863d5241483b206a8f5ffd1fefd540",
            receiver: "0xc745ffa4f97fa9739fae0cb173996f70bb8e4b0310fa781ccca2f7dc13f7db06",
            amount: 100_000_000,
            sequence_number: 5,
            max_gas_amount: 100_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_736_870_700,
            chain_id: 2,
            fee_asset: "0x1::cedra_coin::CedraCoin",
            expected_sender: "3c9124028c90111d7cfd47a28fae30612e397d115c7b78f69713fb729347a77e",
            expected_raw: concat!(
                "3c9124028c90111d7cfd47a28fae30612e397d115c7b78f69713fb729347a77e",
                "0500000000000000",
                "02",
                "0000000000000000000000000000000000000000000000000000000000000001",
                "0d63656472615f6163636f756e74",
                "087472616e73666572",
                "00",
                "02",
                "20c745ffa4f97fa9739fae0cb173996f70bb8e4b0310fa781ccca2f7dc13f7db06",
                "0800e1f50500000000",
                "a086010000000000",
                "6400000000000000",
                "2c8b866700000000",
                "02",
                "07",
                "0000000000000000000000000000000000000000000000000000000000000001",
                "0a63656472615f636f696e",
                "094365647261436f696e",
                "00",
            ),
            expected_signature: concat!(
                "b8b58f4a121273f69ca75b24a026c1eab8f6afb3733891ec20a41d0364577e93",
                "9fb09c544bb4442213f2692b66bb68d2947c7e4bbe40cb4b640a643cfa9af90b",
            ),
            expected_hash: "0x9bc172d061108d670930835ddc023694e94844cbcb3ad31b5dd9930815ef15d6",
        },
        GoldenVector {
            name: "localnet transfer, zero gas price, custom fee asset",
            private_key: "4242424242424242424242424242424242424242424242424242424242424242",
            receiver: "0x1",
            amount: 1,
            sequence_number: 0,
            max_gas_amount: 2_000,
            gas_unit_price: 0,
            expiration_timestamp_secs: 0,
            chain_id: 4,
            fee_asset: "0x2::usd::Usd",
            expected_sender: "ebece0f4f2e5a8b42a809a673677fc7bb360b38f367953cdffc670613d3279c8",
            expected_raw: concat!(
                "ebece0f4f2e5a8b42a809a673677fc7bb360b38f367953cdffc670613d3279c8",
                "0000000000000000",
                "02",
                "0000000000000000000000000000000000000000000000000000000000000001",
                "0d63656472615f6163636f756e74",
                "087472616e73666572",
                "00",
                "02",
                "200000000000000000000000000000000000000000000000000000000000000001",
                "080100000000000000",
                "d007000000000000",
                "0000000000000000",
                "0000000000000000",
                "04",
                "07",
                "0000000000000000000000000000000000000000000000000000000000000002",
                "03757364",
                "03557364",
                "00",
            ),
            expected_signature: concat!(
                "51eabd27b06a3c263a8e0f7b82269097d8ec4f9caaec45a7f412b2035b3f037e",
                "27af06fb32fbe114ffb7ecec74b0ed1cfc829024ef1ad7949dc18307edf66000",
            ),
            expected_hash: "0x9e257e3bb33e4735b473cf9c82cdaba4ce0b71d524139072b8a45be0c30b9a53",
        },
    ]
}

/// The sender account of a vector.
///
/// Panics on a malformed vector.
pub fn account_from_vector(vector: &GoldenVector) -> Account {
    Account::from_private_key_hex(vector.private_key).expect("golden private key")
}

/// Build the raw transaction described by a vector.
///
/// Panics on a malformed vector.
pub fn raw_transaction_from_vector(vector: &GoldenVector) -> RawTransaction {
    let receiver = AccountAddress::from_hex(vector.receiver).expect("golden receiver");
    RawTransaction {
        sender: account_from_vector(vector).address(),
        sequence_number: vector.sequence_number,
        payload: TransactionPayload::transfer(receiver, vector.amount),
        max_gas_amount: vector.max_gas_amount,
        gas_unit_price: vector.gas_unit_price,
        expiration_timestamp_secs: vector.expiration_timestamp_secs,
        chain_id: vector.chain_id,
        fee_asset: StructTag::parse(vector.fee_asset).expect("golden fee asset"),
    }
}

/// Sign the raw transaction described by a vector.
pub fn signed_transaction_from_vector(vector: &GoldenVector) -> SignedTransaction {
    raw_transaction_from_vector(vector)
        .sign(&account_from_vector(vector))
        .expect("golden sender signs its own transaction")
}

/// Check every vector. Returns `(name, passed, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .into_iter()
        .map(|vector| {
            let signed = signed_transaction_from_vector(&vector);
            let checks = [
                (
                    "sender",
                    account_from_vector(&vector).address().to_hex(),
                    vector.expected_sender,
                ),
                ("raw", hex::encode(signed.raw_bytes()), vector.expected_raw),
                (
                    "signature",
                    signed.authenticator().signature().to_hex(),
                    vector.expected_signature,
                ),
                ("hash", signed.hash(), vector.expected_hash),
            ];
            let mismatches: Vec<String> = checks
                .iter()
                .filter(|(_, actual, expected)| actual.as_str() != *expected)
                .map(|(field, actual, expected)| {
                    format!("{}: expected {}, got {}", field, expected, actual)
                })
                .collect();
            (
                vector.name.to_string(),
                mismatches.is_empty(),
                mismatches.join("; "),
            )
        })
        .collect()
}
