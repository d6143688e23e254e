//! Transaction payloads: entry-function calls.

use crate::address::AccountAddress;
use crate::canonical::{encode_u64, Encoder};

/// `TransactionPayload` variant for an entry-function call.
pub const ENTRY_FUNCTION_VARIANT: u64 = 2;

/// A call to a public entry function.
///
/// Arguments are opaque: each one must already be in its canonical form
/// (e.g. [`encode_u64`] for a `u64`, 32 raw bytes for an `address`). They are
/// only wrapped with a length prefix here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPayload {
    pub module_address: AccountAddress,
    pub module_name: String,
    pub function_name: String,
    pub arguments: Vec<Vec<u8>>,
}

impl TransactionPayload {
    /// Start a payload for `module_address::module_name::function_name`.
    pub fn new(
        module_address: AccountAddress,
        module_name: impl Into<String>,
        function_name: impl Into<String>,
    ) -> Self {
        Self {
            module_address,
            module_name: module_name.into(),
            function_name: function_name.into(),
            arguments: Vec::new(),
        }
    }

    /// Append a pre-encoded argument.
    pub fn arg(mut self, encoded: impl Into<Vec<u8>>) -> Self {
        self.arguments.push(encoded.into());
        self
    }

    /// `0x1::cedra_account::transfer(receiver, amount)`.
    pub fn transfer(receiver: AccountAddress, amount: u64) -> Self {
        Self::new(AccountAddress::ONE, "cedra_account", "transfer")
            .arg(receiver.as_bytes().to_vec())
            .arg(encode_u64(amount))
    }

    /// Canonical encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut enc = Encoder::new();
        self.encode_to(&mut enc);
        enc.into_bytes()
    }

    pub(crate) fn encode_to(&self, enc: &mut Encoder) {
        enc.write_variant(ENTRY_FUNCTION_VARIANT)
            .write_raw(self.module_address.as_bytes())
            .write_str(&self.module_name)
            .write_str(&self.function_name)
            // type arguments
            .write_seq_len(0)
            .write_seq_len(self.arguments.len());
        for arg in &self.arguments {
            enc.write_bytes(arg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::Decoder;

    #[test]
    fn test_encode_layout() {
        let payload = TransactionPayload::new(AccountAddress::ONE, "m", "f")
            .arg(vec![0xaa])
            .arg(vec![]);
        let bytes = payload.encode();

        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.read_variant().unwrap(), ENTRY_FUNCTION_VARIANT);
        assert_eq!(dec.read_array::<32>().unwrap(), *AccountAddress::ONE.as_bytes());
        assert_eq!(dec.read_str().unwrap(), "m");
        assert_eq!(dec.read_str().unwrap(), "f");
        assert_eq!(dec.read_seq_len().unwrap(), 0);
        assert_eq!(dec.read_seq_len().unwrap(), 2);
        assert_eq!(dec.read_bytes().unwrap(), &[0xaa]);
        assert_eq!(dec.read_bytes().unwrap(), &[] as &[u8]);
        dec.finish().unwrap();
    }

    #[test]
    fn test_no_arguments() {
        let bytes = TransactionPayload::new(AccountAddress::ONE, "m", "f").encode();
        // variant, address, "m", "f", no type args, no args
        assert_eq!(bytes.len(), 1 + 32 + 2 + 2 + 1 + 1);
        assert_eq!(&bytes[bytes.len() - 2..], &[0, 0]);
    }

    #[test]
    fn test_transfer_arguments() {
        let receiver = AccountAddress::from_bytes([0x11; 32]);
        let payload = TransactionPayload::transfer(receiver, 100_000_000);

        assert_eq!(payload.module_address, AccountAddress::ONE);
        assert_eq!(payload.module_name, "cedra_account");
        assert_eq!(payload.function_name, "transfer");
        assert_eq!(payload.arguments[0], vec![0x11; 32]);
        assert_eq!(payload.arguments[1], 100_000_000u64.to_le_bytes().to_vec());
    }

    #[test]
    fn test_argument_contents_are_not_interpreted() {
        // A pre-encoded string argument is wrapped once more, not re-encoded.
        let arg = crate::canonical::encode_str("hi");
        let bytes = TransactionPayload::new(AccountAddress::ONE, "m", "f")
            .arg(arg.clone())
            .encode();
        let tail = &bytes[bytes.len() - (arg.len() + 1)..];
        assert_eq!(tail[0] as usize, arg.len());
        assert_eq!(&tail[1..], arg.as_slice());
    }
}
