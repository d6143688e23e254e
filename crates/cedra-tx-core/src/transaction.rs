//! Raw transactions, domain-separated signing, and signed transactions.
//!
//! Lifecycle: a [`RawTransaction`] is built with every field populated,
//! encoded, and signed into a [`SignedTransaction`], which is submitted once.

use std::sync::OnceLock;

use crate::account::Account;
use crate::address::AccountAddress;
use crate::authenticator::Authenticator;
use crate::canonical::Encoder;
use crate::crypto::Sha3Hash;
use crate::error::{CoreError, Result};
use crate::payload::TransactionPayload;
use crate::struct_tag::StructTag;

/// Domain separator hashed into the raw-transaction signing salt.
pub const RAW_TRANSACTION_DOMAIN: &[u8] = b"CEDRA::RawTransaction";

/// Domain separator hashed into the committed-transaction hash salt.
pub const TRANSACTION_DOMAIN: &[u8] = b"CEDRA::Transaction";

/// `Transaction` variant for a user transaction (hash input).
const USER_TRANSACTION_VARIANT: u8 = 0;

/// `SHA3-256("CEDRA::RawTransaction")`, prepended to every signed message.
pub fn raw_transaction_salt() -> &'static [u8; 32] {
    static SALT: OnceLock<[u8; 32]> = OnceLock::new();
    SALT.get_or_init(|| Sha3Hash::hash(RAW_TRANSACTION_DOMAIN).0)
}

fn transaction_salt() -> &'static [u8; 32] {
    static SALT: OnceLock<[u8; 32]> = OnceLock::new();
    SALT.get_or_init(|| Sha3Hash::hash(TRANSACTION_DOMAIN).0)
}

/// An unsigned transaction.
///
/// Field order in [`RawTransaction::encode`] is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    /// Must equal the sender's next on-chain sequence number when submitted.
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    /// Unix seconds after which the node rejects the transaction.
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
    /// Asset the fee is paid in.
    pub fee_asset: StructTag,
}

impl RawTransaction {
    /// Replace the fee asset with a parsed `address::module::name` tag.
    pub fn with_fee_asset(mut self, tag: &str) -> Result<Self> {
        self.fee_asset = StructTag::parse(tag)?;
        Ok(self)
    }

    /// In-place form of [`RawTransaction::with_fee_asset`]. On error the
    /// current fee asset is kept.
    pub fn set_fee_asset(&mut self, tag: &str) -> Result<()> {
        self.fee_asset = StructTag::parse(tag)?;
        Ok(())
    }

    /// Canonical encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut enc = Encoder::with_capacity(256);
        enc.write_raw(self.sender.as_bytes())
            .write_u64(self.sequence_number);
        self.payload.encode_to(&mut enc);
        enc.write_u64(self.max_gas_amount)
            .write_u64(self.gas_unit_price)
            .write_u64(self.expiration_timestamp_secs)
            .write_u8(self.chain_id);
        self.fee_asset.encode_to(&mut enc);
        enc.into_bytes()
    }

    /// The bytes that get signed: `salt || encode()`.
    pub fn signing_message(&self) -> Vec<u8> {
        signing_message(&self.encode())
    }

    /// Sign with the sender's account.
    ///
    /// Fails with [`CoreError::SenderMismatch`] if `account` is not the sender.
    pub fn sign(&self, account: &Account) -> Result<SignedTransaction> {
        if account.address() != self.sender {
            return Err(CoreError::SenderMismatch {
                sender: self.sender.to_string(),
                signer: account.address().to_string(),
            });
        }

        let raw_bytes = self.encode();
        let signature = account.sign(&signing_message(&raw_bytes));
        let authenticator = Authenticator::ed25519(account.public_key(), signature);

        Ok(SignedTransaction {
            raw_bytes,
            authenticator,
        })
    }
}

fn signing_message(raw_bytes: &[u8]) -> Vec<u8> {
    let salt = raw_transaction_salt();
    let mut msg = Vec::with_capacity(salt.len() + raw_bytes.len());
    msg.extend_from_slice(salt);
    msg.extend_from_slice(raw_bytes);
    msg
}

/// A signed transaction, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    raw_bytes: Vec<u8>,
    authenticator: Authenticator,
}

impl SignedTransaction {
    /// The encoded raw transaction that was signed.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_bytes
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Re-check the signature over the encoded raw transaction.
    pub fn verify(&self) -> Result<()> {
        self.authenticator.verify(&signing_message(&self.raw_bytes))
    }

    /// Submission body: `raw_bytes || authenticator`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let auth = self.authenticator.encode();
        let mut out = Vec::with_capacity(self.raw_bytes.len() + auth.len());
        out.extend_from_slice(&self.raw_bytes);
        out.extend_from_slice(&auth);
        out
    }

    /// Locally computed committed-transaction hash (`0x`-prefixed hex).
    ///
    /// The hash returned by the node on submission is authoritative.
    pub fn hash(&self) -> String {
        transaction_hash(&self.to_bytes())
    }
}

/// Committed-transaction hash of submitted signed-transaction bytes.
pub fn transaction_hash(signed_bytes: &[u8]) -> String {
    let hash = Sha3Hash::hash_parts(&[
        transaction_salt().as_slice(),
        &[USER_TRANSACTION_VARIANT],
        signed_bytes,
    ]);
    format!("0x{}", hash.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::Decoder;

    fn sample(account: &Account) -> RawTransaction {
        RawTransaction {
            sender: account.address(),
            sequence_number: 7,
            payload: TransactionPayload::transfer(AccountAddress::from_bytes([0x22; 32]), 1_000),
            max_gas_amount: 100_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_700_000_000,
            chain_id: 2,
            fee_asset: StructTag::cedra_coin(),
        }
    }

    #[test]
    fn test_salt_is_hash_of_domain() {
        assert_eq!(
            hex::encode(raw_transaction_salt()),
            "028b8f5d3262a1882c1b02695dc46cad843f449e67320a73fc70a878ac15ddc1"
        );
    }

    #[test]
    fn test_encode_field_order() {
        let account = Account::from_seed(&[0x42; 32]);
        let tx = sample(&account);
        let bytes = tx.encode();

        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.read_array::<32>().unwrap(), *account.address().as_bytes());
        assert_eq!(dec.read_u64().unwrap(), 7);
        let payload = tx.payload.encode();
        assert_eq!(dec.read_raw(payload.len()).unwrap(), payload.as_slice());
        assert_eq!(dec.read_u64().unwrap(), 100_000);
        assert_eq!(dec.read_u64().unwrap(), 100);
        assert_eq!(dec.read_u64().unwrap(), 1_700_000_000);
        assert_eq!(dec.read_u8().unwrap(), 2);
        let tag = StructTag::cedra_coin().encode();
        assert_eq!(dec.read_raw(tag.len()).unwrap(), tag.as_slice());
        dec.finish().unwrap();
    }

    #[test]
    fn test_signing_message_is_salted() {
        let account = Account::from_seed(&[0x42; 32]);
        let tx = sample(&account);
        let msg = tx.signing_message();
        assert_eq!(&msg[..32], raw_transaction_salt());
        assert_eq!(&msg[32..], tx.encode().as_slice());
    }

    #[test]
    fn test_sign_is_deterministic_and_verifies() {
        let account = Account::from_seed(&[0x42; 32]);
        let tx = sample(&account);

        let s1 = tx.sign(&account).unwrap();
        let s2 = tx.sign(&account).unwrap();
        assert_eq!(s1, s2);
        assert_eq!(s1.raw_bytes(), tx.encode().as_slice());
        s1.verify().unwrap();
    }

    #[test]
    fn test_signature_covers_salt() {
        let account = Account::from_seed(&[0x42; 32]);
        let tx = sample(&account);
        let signed = tx.sign(&account).unwrap();

        // Without the salt the signature must not verify.
        assert!(signed.authenticator().verify(&tx.encode()).is_err());
    }

    #[test]
    fn test_sign_rejects_other_account() {
        let account = Account::from_seed(&[0x42; 32]);
        let other = Account::from_seed(&[0x43; 32]);
        let tx = sample(&account);
        assert!(matches!(
            tx.sign(&other),
            Err(CoreError::SenderMismatch { .. })
        ));
    }

    #[test]
    fn test_signed_bytes_append_authenticator() {
        let account = Account::from_seed(&[0x42; 32]);
        let signed = sample(&account).sign(&account).unwrap();
        let bytes = signed.to_bytes();
        let raw_len = signed.raw_bytes().len();

        assert_eq!(&bytes[..raw_len], signed.raw_bytes());
        assert_eq!(&bytes[raw_len..], signed.authenticator().encode().as_slice());
    }

    #[test]
    fn test_hash_changes_with_content() {
        let account = Account::from_seed(&[0x42; 32]);
        let mut tx = sample(&account);
        let h1 = tx.sign(&account).unwrap().hash();
        tx.sequence_number += 1;
        let h2 = tx.sign(&account).unwrap().hash();

        assert!(h1.starts_with("0x"));
        assert_eq!(h1.len(), 66);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_with_fee_asset() {
        let account = Account::from_seed(&[0x42; 32]);
        let tx = sample(&account).with_fee_asset("0x2::usd::Usd").unwrap();
        assert_eq!(tx.fee_asset.module, "usd");

        let err = sample(&account).with_fee_asset("usd").unwrap_err();
        assert!(matches!(err, CoreError::MalformedTypeTag(_)));

        let mut tx = sample(&account);
        assert!(tx.set_fee_asset("0x1::usd").is_err());
        assert_eq!(tx.fee_asset, StructTag::cedra_coin());
    }
}
