//! CIS-2 event decoding.
//!
//! The standard reserves the tags 251 to 255. Everything else a contract logs,
//! including an empty event, is passed through untouched as
//! [`Cis2Event::Custom`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::serialize::Deserial;
use super::types::{Address, MetadataUrl, OperatorUpdate, TokenAmount, TokenId};
use crate::encoding::Reader;
use crate::error::Result;
use crate::types::HexBytes;

pub const TRANSFER_EVENT_TAG: u8 = 255;
pub const MINT_EVENT_TAG: u8 = 254;
pub const BURN_EVENT_TAG: u8 = 253;
pub const UPDATE_OPERATOR_EVENT_TAG: u8 = 252;
pub const TOKEN_METADATA_EVENT_TAG: u8 = 251;

/// A decoded contract event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Cis2Event {
    #[serde(rename_all = "camelCase")]
    Transfer {
        token_id: TokenId,
        token_amount: TokenAmount,
        from: Address,
        to: Address,
    },
    #[serde(rename_all = "camelCase")]
    Mint {
        token_id: TokenId,
        token_amount: TokenAmount,
        owner: Address,
    },
    #[serde(rename_all = "camelCase")]
    Burn {
        token_id: TokenId,
        token_amount: TokenAmount,
        owner: Address,
    },
    #[serde(rename_all = "camelCase")]
    UpdateOperator {
        update: OperatorUpdate,
        owner: Address,
        operator: Address,
    },
    #[serde(rename_all = "camelCase")]
    TokenMetadata {
        token_id: TokenId,
        metadata_url: MetadataUrl,
    },
    /// Any event outside the reserved range, kept as the full logged bytes.
    Custom { data: HexBytes },
}

impl Cis2Event {
    /// Decodes one logged event.
    ///
    /// An unknown tag is never an error. A known tag whose body is truncated
    /// or malformed is. Bytes after a complete body are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some((&tag, _)) = bytes.split_first() else {
            return Ok(Self::custom(bytes));
        };
        let mut reader = Reader::new(&bytes[1..]);
        let event = match tag {
            TRANSFER_EVENT_TAG => Self::Transfer {
                token_id: TokenId::deserial(&mut reader)?,
                token_amount: TokenAmount::deserial(&mut reader)?,
                from: Address::deserial(&mut reader)?,
                to: Address::deserial(&mut reader)?,
            },
            MINT_EVENT_TAG => Self::Mint {
                token_id: TokenId::deserial(&mut reader)?,
                token_amount: TokenAmount::deserial(&mut reader)?,
                owner: Address::deserial(&mut reader)?,
            },
            BURN_EVENT_TAG => Self::Burn {
                token_id: TokenId::deserial(&mut reader)?,
                token_amount: TokenAmount::deserial(&mut reader)?,
                owner: Address::deserial(&mut reader)?,
            },
            UPDATE_OPERATOR_EVENT_TAG => Self::UpdateOperator {
                update: OperatorUpdate::deserial(&mut reader)?,
                owner: Address::deserial(&mut reader)?,
                operator: Address::deserial(&mut reader)?,
            },
            TOKEN_METADATA_EVENT_TAG => Self::TokenMetadata {
                token_id: TokenId::deserial(&mut reader)?,
                metadata_url: MetadataUrl::deserial(&mut reader)?,
            },
            _ => Self::custom(bytes),
        };
        trace!(tag, custom = event.is_custom(), "decoded CIS-2 event");
        Ok(event)
    }

    fn custom(bytes: &[u8]) -> Self {
        Self::Custom {
            data: HexBytes::new(bytes),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }
}

/// Decodes every event in `events` and keeps the standard ones, in order.
///
/// Fails on the first event with a reserved tag that does not decode.
pub fn decode_standard_events<I, B>(events: I) -> Result<Vec<Cis2Event>>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut decoded = Vec::new();
    for event in events {
        let event = Cis2Event::decode(event.as_ref())?;
        if !event.is_custom() {
            decoded.push(event);
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cis2::serialize::Serial;
    use crate::error::CodecError;
    use crate::types::{AccountAddress, ContractAddress};

    fn account(byte: u8) -> Address {
        Address::Account(AccountAddress::new([byte; 32]))
    }

    fn encode(tag: u8, parts: &[&dyn Serial]) -> Vec<u8> {
        let mut out = vec![tag];
        for part in parts {
            part.serial(&mut out).unwrap();
        }
        out
    }

    #[test]
    fn transfer_event() {
        let id = TokenId::from_hex("01").unwrap();
        let amount = TokenAmount::from(1_000);
        let to = Address::Contract(ContractAddress::new(4, 0));
        let bytes = encode(TRANSFER_EVENT_TAG, &[&id, &amount, &account(1), &to]);
        assert_eq!(
            Cis2Event::decode(&bytes).unwrap(),
            Cis2Event::Transfer {
                token_id: id,
                token_amount: amount,
                from: account(1),
                to,
            }
        );
    }

    #[test]
    fn mint_and_burn_events() {
        let id = TokenId::default();
        let amount = TokenAmount::from(5);
        let mint = encode(MINT_EVENT_TAG, &[&id, &amount, &account(2)]);
        let burn = encode(BURN_EVENT_TAG, &[&id, &amount, &account(2)]);
        assert!(matches!(Cis2Event::decode(&mint).unwrap(), Cis2Event::Mint { .. }));
        assert_eq!(
            Cis2Event::decode(&burn).unwrap(),
            Cis2Event::Burn {
                token_id: id,
                token_amount: amount,
                owner: account(2),
            }
        );
    }

    #[test]
    fn update_operator_event() {
        let bytes = encode(
            UPDATE_OPERATOR_EVENT_TAG,
            &[&OperatorUpdate::Remove, &account(1), &account(2)],
        );
        assert_eq!(
            Cis2Event::decode(&bytes).unwrap(),
            Cis2Event::UpdateOperator {
                update: OperatorUpdate::Remove,
                owner: account(1),
                operator: account(2),
            }
        );
    }

    #[test]
    fn token_metadata_event() {
        let id = TokenId::from_hex("ff").unwrap();
        let url = MetadataUrl {
            url: "https://example.com/token.json".to_string(),
            hash: None,
        };
        let bytes = encode(TOKEN_METADATA_EVENT_TAG, &[&id, &url]);
        assert_eq!(
            Cis2Event::decode(&bytes).unwrap(),
            Cis2Event::TokenMetadata {
                token_id: id,
                metadata_url: url,
            }
        );
    }

    #[test]
    fn unknown_tag_is_custom() {
        let bytes = [200, 1, 2, 3];
        assert_eq!(
            Cis2Event::decode(&bytes).unwrap(),
            Cis2Event::Custom {
                data: HexBytes::new(bytes.to_vec()),
            }
        );
    }

    #[test]
    fn empty_event_is_custom() {
        assert!(Cis2Event::decode(&[]).unwrap().is_custom());
    }

    #[test]
    fn truncated_standard_event_fails() {
        assert!(matches!(
            Cis2Event::decode(&[MINT_EVENT_TAG, 0, 5]),
            Err(CodecError::Decode { .. })
        ));
    }

    #[test]
    fn filter_keeps_standard_events_in_order() {
        let mint = encode(MINT_EVENT_TAG, &[&TokenId::default(), &TokenAmount::from(1), &account(1)]);
        let burn = encode(BURN_EVENT_TAG, &[&TokenId::default(), &TokenAmount::from(1), &account(1)]);
        let events = vec![vec![7u8, 7], mint, Vec::new(), burn];
        let decoded = decode_standard_events(&events).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!(matches!(decoded[0], Cis2Event::Mint { .. }));
        assert!(matches!(decoded[1], Cis2Event::Burn { .. }));
    }

    #[test]
    fn json_is_tagged_by_type() {
        let event = Cis2Event::Custom {
            data: HexBytes::new(vec![0xc8]),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"custom","data":"c8"}"#
        );
    }
}
