//! Sign digests, transaction hashes and the block item form of an account
//! transaction.
//!
//! The header's energy and payload size are recomputed from the payload on
//! every call. The sign digest uses an assumed signature count (the real
//! signatures do not exist yet); the hash and the block item use the count
//! of the signature map actually attached.

use tracing::debug;

use super::energy::calculate_energy_cost;
use super::signature::AccountTransactionSignature;
use super::types::AccountTransaction;
use crate::config::{BLOCK_ITEM_KIND_ACCOUNT_TRANSACTION, BLOCK_ITEM_VERSION, DEFAULT_SIGNATURE_COUNT};
use crate::encoding::put_u8;
use crate::error::{CodecError, Result};
use crate::hash::{sha256, TransactionHash};

/// Writes `header ‖ kind tag ‖ payload` with energy priced for
/// `signature_count` signatures.
fn serialize_header_and_payload(
    transaction: &AccountTransaction,
    signature_count: u64,
    out: &mut Vec<u8>,
) -> Result<()> {
    let payload = transaction.payload.serialize_tagged()?;
    let payload_size = u32::try_from(payload.len())
        .map_err(|_| CodecError::size("payload", u32::MAX as usize, payload.len()))?;
    let energy = calculate_energy_cost(
        signature_count,
        u64::from(payload_size),
        transaction.payload.base_energy_cost()?,
    )?;
    transaction.header.serialize_into(out, payload_size, energy);
    out.extend_from_slice(&payload);
    Ok(())
}

/// The digest the sender's keys sign.
///
/// `signature_count` is the number of signatures the transaction will carry;
/// `None` assumes a single one.
pub fn account_transaction_sign_digest(
    transaction: &AccountTransaction,
    signature_count: Option<u64>,
) -> Result<[u8; 32]> {
    let count = signature_count.unwrap_or(DEFAULT_SIGNATURE_COUNT);
    let mut preimage = Vec::new();
    serialize_header_and_payload(transaction, count, &mut preimage)?;
    Ok(sha256(&preimage))
}

/// The block item: `0 ‖ signatures ‖ header ‖ kind tag ‖ payload`.
pub fn serialize_account_transaction(
    transaction: &AccountTransaction,
    signature: &AccountTransactionSignature,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    put_u8(&mut out, BLOCK_ITEM_KIND_ACCOUNT_TRANSACTION);
    signature.serialize_into(&mut out)?;
    serialize_header_and_payload(transaction, signature.signature_count(), &mut out)?;
    Ok(out)
}

/// Hash under which the node reports the transaction's status.
pub fn account_transaction_hash(
    transaction: &AccountTransaction,
    signature: &AccountTransactionSignature,
) -> Result<TransactionHash> {
    let item = serialize_account_transaction(transaction, signature)?;
    Ok(TransactionHash::new(sha256(&item)))
}

/// The versioned block item sent to a node.
pub fn serialize_account_transaction_for_submission(
    transaction: &AccountTransaction,
    signature: &AccountTransactionSignature,
) -> Result<Vec<u8>> {
    let item = serialize_account_transaction(transaction, signature)?;
    let mut out = Vec::with_capacity(1 + item.len());
    put_u8(&mut out, BLOCK_ITEM_VERSION);
    out.extend_from_slice(&item);
    debug!(
        kind = %transaction.kind(),
        signatures = signature.signature_count(),
        size = out.len(),
        "serialized account transaction for submission"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::payload::{AccountTransactionPayload, Transfer};
    use crate::transaction::signature::Signature;
    use crate::transaction::types::AccountTransactionHeader;
    use crate::types::{AccountAddress, CcdAmount, TransactionExpiry};

    fn transfer() -> AccountTransaction {
        AccountTransaction::new(
            AccountTransactionHeader::new(
                AccountAddress::from_base58("4hXCdgNTxgM7LNm8nFJEfjDhEcyjjqQnPSRyBS9QgmHKQVxKRf")
                    .unwrap(),
                5,
                TransactionExpiry::from_epoch_seconds(1_700_000_000),
            ),
            AccountTransactionPayload::Transfer(Transfer {
                to_address: AccountAddress::new([1; 32]),
                amount: CcdAmount::from_micro_ccd(1_000_000),
            }),
        )
    }

    fn signature() -> AccountTransactionSignature {
        AccountTransactionSignature::single(Signature::new([0x5a; 64]))
    }

    #[test]
    fn sign_digest_vector() {
        let digest = account_transaction_sign_digest(&transfer(), None).unwrap();
        assert_eq!(
            hex::encode(digest),
            "5cc2b23cf5f96f14909d9c6fc4c37601f1b59ab9d8dd6621c9f5c66b64c0f897"
        );
        assert_eq!(account_transaction_sign_digest(&transfer(), Some(1)).unwrap(), digest);
    }

    #[test]
    fn sign_digest_depends_on_signature_count() {
        let one = account_transaction_sign_digest(&transfer(), Some(1)).unwrap();
        let two = account_transaction_sign_digest(&transfer(), Some(2)).unwrap();
        assert_ne!(one, two);
    }

    #[test]
    fn block_item_layout() {
        let item = serialize_account_transaction(&transfer(), &signature()).unwrap();
        assert_eq!(item.len(), 172);
        assert_eq!(&item[..7], &[0, 1, 0, 1, 0, 0, 0x40]);
        // energy field of the header: 100 + 60 + 41 + 300
        let header_start = 1 + 4 + 2 + 64;
        let energy = &item[header_start + 40..header_start + 48];
        assert_eq!(u64::from_be_bytes(energy.try_into().unwrap()), 501);
    }

    #[test]
    fn hash_vector() {
        let hash = account_transaction_hash(&transfer(), &signature()).unwrap();
        assert_eq!(
            hash.to_hex(),
            "93d5534800231848f209ef308596f953c5872706d5006e3ba7690b861b36e97b"
        );
        assert_eq!(account_transaction_hash(&transfer(), &signature()).unwrap(), hash);
    }

    #[test]
    fn submission_prefixes_version() {
        let item = serialize_account_transaction(&transfer(), &signature()).unwrap();
        let submission = serialize_account_transaction_for_submission(&transfer(), &signature()).unwrap();
        assert_eq!(submission[0], 0);
        assert_eq!(&submission[1..], item.as_slice());
    }

    #[test]
    fn empty_signature_map_fails() {
        assert!(matches!(
            account_transaction_hash(&transfer(), &AccountTransactionSignature::new()),
            Err(CodecError::InvalidValue { .. })
        ));
    }
}
