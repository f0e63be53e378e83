//! Account transaction payloads.
//!
//! Every payload kind implements [`PayloadCodec`]: how its body is written,
//! how much base energy it costs, and, for the three kinds whose encoding is
//! self-describing, how it is read back. The remaining kinds keep the
//! default `read_from`, which reports [`CodecError::UnsupportedOperation`]
//! instead of guessing at a layout that needs outside schema information.
//!
//! [`AccountTransactionPayload`] is the closed set of kinds and dispatches on
//! the kind tag that precedes every serialized body.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::types::AccountTransactionType;
use crate::config::{
    CONFIGURE_BAKER_WITH_KEYS_COST, SIMPLE_TRANSFER_BASE_COST, UPDATE_CREDENTIALS_BASE_COST,
    UPDATE_CREDENTIALS_COST_PER_EXISTING, UPDATE_CREDENTIALS_COST_PER_KEY,
    UPDATE_CREDENTIALS_COST_PER_NEW,
};
use crate::credential::{CredentialRegistrationId, IndexedCredentialDeploymentInfo};
use crate::encoding::{
    put_bool, put_bytes_u16_be_len, put_bytes_u32_be_len, put_u16_be, put_u32_be, put_u64_be,
    put_u8, Reader,
};
use crate::error::{CodecError, Result};
use crate::types::fixed::fixed_bytes_type;
use crate::types::{
    AccountAddress, CcdAmount, ContractAddress, ContractName, DataBlob, Energy, HexBytes,
    ModuleReference, Parameter, ReceiveName,
};

// ---------------------------------------------------------------------------
// PayloadCodec
// ---------------------------------------------------------------------------

/// Wire encoding and base energy of one payload kind.
pub trait PayloadCodec: Sized {
    const KIND: AccountTransactionType;

    /// Appends the payload body (without the kind tag) to `out`.
    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()>;

    /// The payload body as a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serialize_into(&mut out)?;
        Ok(out)
    }

    /// The kind-specific energy added on top of the size and signature cost.
    fn base_energy_cost(&self) -> Result<Energy>;

    /// Reads a payload body. Kinds whose encoding cannot be inverted keep
    /// this default.
    fn read_from(_reader: &mut Reader<'_>) -> Result<Self> {
        Err(CodecError::UnsupportedOperation { kind: Self::KIND })
    }
}

// ---------------------------------------------------------------------------
// Transfers and data
// ---------------------------------------------------------------------------

/// A plain CCD transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub to_address: AccountAddress,
    pub amount: CcdAmount,
}

impl PayloadCodec for Transfer {
    const KIND: AccountTransactionType = AccountTransactionType::Transfer;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self.to_address.as_bytes());
        put_u64_be(out, self.amount.micro_ccd());
        Ok(())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        Ok(Energy::new(SIMPLE_TRANSFER_BASE_COST))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        let to_address = AccountAddress::new(reader.read_array()?);
        let amount = CcdAmount::from_micro_ccd(reader.read_u64_be()?);
        Ok(Self { to_address, amount })
    }
}

/// A CCD transfer carrying a memo of at most 256 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferWithMemo {
    pub to_address: AccountAddress,
    pub memo: DataBlob,
    pub amount: CcdAmount,
}

impl PayloadCodec for TransferWithMemo {
    const KIND: AccountTransactionType = AccountTransactionType::TransferWithMemo;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self.to_address.as_bytes());
        put_bytes_u16_be_len(out, "memo", self.memo.as_bytes())?;
        put_u64_be(out, self.amount.micro_ccd());
        Ok(())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        Ok(Energy::new(SIMPLE_TRANSFER_BASE_COST))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        let to_address = AccountAddress::new(reader.read_array()?);
        let memo = DataBlob::new(reader.read_bytes_u16_be_len()?)?;
        let amount = CcdAmount::from_micro_ccd(reader.read_u64_be()?);
        Ok(Self {
            to_address,
            memo,
            amount,
        })
    }
}

/// Registers an arbitrary blob of at most 256 bytes on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub data: DataBlob,
}

impl PayloadCodec for RegisterData {
    const KIND: AccountTransactionType = AccountTransactionType::RegisterData;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        put_bytes_u16_be_len(out, "data", self.data.as_bytes())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        Ok(Energy::new(SIMPLE_TRANSFER_BASE_COST))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            data: DataBlob::new(reader.read_bytes_u16_be_len()?)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Smart contracts
// ---------------------------------------------------------------------------

/// Deploys a Wasm module.
///
/// With `version` unset the source is taken to be a versioned module that
/// already starts with its 4-byte version and 4-byte length, and is written
/// unchanged. With `version` set, both prefixes are added here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployModule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub source: HexBytes,
}

impl DeployModule {
    const EMBEDDED_HEADER_LENGTH: usize = 8;

    /// Length of the module code itself, without any version header.
    fn code_length(&self) -> usize {
        match self.version {
            Some(_) => self.source.len(),
            None => self.source.len().saturating_sub(Self::EMBEDDED_HEADER_LENGTH),
        }
    }
}

impl PayloadCodec for DeployModule {
    const KIND: AccountTransactionType = AccountTransactionType::DeployModule;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        match self.version {
            None => out.extend_from_slice(self.source.as_bytes()),
            Some(version) => {
                put_u32_be(out, version);
                put_bytes_u32_be_len(out, "module source", self.source.as_bytes())?;
            }
        }
        Ok(())
    }

    /// One energy per ten bytes of module code, rounded down.
    fn base_energy_cost(&self) -> Result<Energy> {
        Ok(Energy::new(self.code_length() as u64 / 10))
    }
}

/// Creates a contract instance from a deployed module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitContract {
    pub amount: CcdAmount,
    pub module_ref: ModuleReference,
    /// Contract name without the `init_` prefix.
    pub init_name: ContractName,
    pub param: Parameter,
    pub max_contract_execution_energy: Energy,
}

impl PayloadCodec for InitContract {
    const KIND: AccountTransactionType = AccountTransactionType::InitContract;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        put_u64_be(out, self.amount.micro_ccd());
        out.extend_from_slice(self.module_ref.as_bytes());
        put_bytes_u16_be_len(out, "init name", self.init_name.init_name().as_bytes())?;
        put_bytes_u16_be_len(out, "parameter", self.param.as_bytes())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        Ok(self.max_contract_execution_energy)
    }
}

/// Invokes an entrypoint of an existing contract instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContract {
    pub amount: CcdAmount,
    pub address: ContractAddress,
    pub receive_name: ReceiveName,
    pub message: Parameter,
    pub max_contract_execution_energy: Energy,
}

impl PayloadCodec for UpdateContract {
    const KIND: AccountTransactionType = AccountTransactionType::Update;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        put_u64_be(out, self.amount.micro_ccd());
        put_u64_be(out, self.address.index);
        put_u64_be(out, self.address.subindex);
        put_bytes_u16_be_len(out, "receive name", self.receive_name.as_str().as_bytes())?;
        put_bytes_u16_be_len(out, "parameter", self.message.as_bytes())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        Ok(self.max_contract_execution_energy)
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Adds and removes credentials of the sender account and sets its
/// signature threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentials {
    pub new_credentials: Vec<IndexedCredentialDeploymentInfo>,
    pub remove_credential_ids: Vec<CredentialRegistrationId>,
    pub threshold: u8,
    /// Credentials on the account before the update; only used for pricing.
    pub current_number_of_credentials: u64,
}

impl PayloadCodec for UpdateCredentials {
    const KIND: AccountTransactionType = AccountTransactionType::UpdateCredentials;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        let added = u8::try_from(self.new_credentials.len()).map_err(|_| {
            CodecError::size("new credentials", u8::MAX as usize, self.new_credentials.len())
        })?;
        put_u8(out, added);
        for credential in &self.new_credentials {
            put_u8(out, credential.index);
            credential.cdi.serialize_into(out)?;
        }

        let removed = u8::try_from(self.remove_credential_ids.len()).map_err(|_| {
            CodecError::size(
                "removed credentials",
                u8::MAX as usize,
                self.remove_credential_ids.len(),
            )
        })?;
        put_u8(out, removed);
        for cred_id in &self.remove_credential_ids {
            out.extend_from_slice(cred_id.as_bytes());
        }

        put_u8(out, self.threshold);
        Ok(())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        let overflow = || CodecError::invalid("credential update energy overflows 64 bits");
        let mut total = UPDATE_CREDENTIALS_COST_PER_EXISTING
            .checked_mul(self.current_number_of_credentials)
            .and_then(|existing| existing.checked_add(UPDATE_CREDENTIALS_BASE_COST))
            .ok_or_else(overflow)?;
        for credential in &self.new_credentials {
            let keys = credential.cdi.values.key_count() as u64;
            total = UPDATE_CREDENTIALS_COST_PER_KEY
                .checked_mul(keys)
                .and_then(|per_key| per_key.checked_add(UPDATE_CREDENTIALS_COST_PER_NEW))
                .and_then(|entry| entry.checked_add(total))
                .ok_or_else(overflow)?;
        }
        Ok(Energy::new(total))
    }
}

// ---------------------------------------------------------------------------
// Staking
// ---------------------------------------------------------------------------

/// Accumulates optional fields behind a 2-byte presence bitmap.
///
/// Fields must be offered in wire order; the n-th call owns bit n.
struct OptionalFields {
    bitmap: u16,
    next_bit: u16,
    body: Vec<u8>,
}

impl OptionalFields {
    fn new() -> Self {
        Self {
            bitmap: 0,
            next_bit: 0,
            body: Vec::new(),
        }
    }

    fn field<T>(
        &mut self,
        value: Option<&T>,
        write: impl FnOnce(&T, &mut Vec<u8>) -> Result<()>,
    ) -> Result<()> {
        if let Some(value) = value {
            self.bitmap |= 1 << self.next_bit;
            write(value, &mut self.body)?;
        }
        self.next_bit += 1;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) {
        put_u16_be(out, self.bitmap);
        out.extend_from_slice(&self.body);
    }
}

/// Where a delegator's stake goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "delegateType")]
pub enum DelegationTarget {
    Passive,
    Baker {
        #[serde(rename = "bakerId")]
        baker_id: u64,
    },
}

impl DelegationTarget {
    fn serialize_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Passive => put_u8(out, 0),
            Self::Baker { baker_id } => {
                put_u8(out, 1);
                put_u64_be(out, *baker_id);
            }
        }
    }
}

/// Registers, updates or removes the sender as a delegator. Only the fields
/// that are set are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureDelegation {
    /// Zero removes the delegation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake: Option<CcdAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restake_earnings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation_target: Option<DelegationTarget>,
}

impl PayloadCodec for ConfigureDelegation {
    const KIND: AccountTransactionType = AccountTransactionType::ConfigureDelegation;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        let mut fields = OptionalFields::new();
        fields.field(self.stake.as_ref(), |stake, body| {
            put_u64_be(body, stake.micro_ccd());
            Ok(())
        })?;
        fields.field(self.restake_earnings.as_ref(), |restake, body| {
            put_bool(body, *restake);
            Ok(())
        })?;
        fields.field(self.delegation_target.as_ref(), |target, body| {
            target.serialize_into(body);
            Ok(())
        })?;
        fields.finish(out);
        Ok(())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        Ok(Energy::new(SIMPLE_TRANSFER_BASE_COST))
    }
}

/// Whether a validator pool accepts delegators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum OpenStatus {
    OpenForAll = 0,
    ClosedForNew = 1,
    ClosedForAll = 2,
}

fixed_bytes_type!(
    /// A 32-byte validator public key (election or signature key).
    BakerVerifyKey,
    32,
    "baker verify key"
);

fixed_bytes_type!(
    /// A BLS public key used for finalization aggregation.
    BakerAggregationVerifyKey,
    96,
    "baker aggregation verify key"
);

fixed_bytes_type!(
    /// A proof of knowledge of the secret key behind a validator key.
    KeyProof,
    64,
    "key proof"
);

/// New validator keys, each with its proof of ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakerKeysWithProofs {
    pub election_verify_key: BakerVerifyKey,
    pub proof_election: KeyProof,
    pub signature_verify_key: BakerVerifyKey,
    pub proof_sig: KeyProof,
    pub aggregation_verify_key: BakerAggregationVerifyKey,
    pub proof_aggregation: KeyProof,
}

impl BakerKeysWithProofs {
    fn serialize_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.election_verify_key.as_bytes());
        out.extend_from_slice(self.proof_election.as_bytes());
        out.extend_from_slice(self.signature_verify_key.as_bytes());
        out.extend_from_slice(self.proof_sig.as_bytes());
        out.extend_from_slice(self.aggregation_verify_key.as_bytes());
        out.extend_from_slice(self.proof_aggregation.as_bytes());
    }
}

/// Registers, updates or removes the sender as a validator. Only the fields
/// that are set are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureBaker {
    /// Zero removes the validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake: Option<CcdAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restake_earnings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_for_delegation: Option<OpenStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<BakerKeysWithProofs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_url: Option<String>,
    /// Commission rates in parts per hundred thousand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_fee_commission: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baking_reward_commission: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalization_reward_commission: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
}

impl PayloadCodec for ConfigureBaker {
    const KIND: AccountTransactionType = AccountTransactionType::ConfigureBaker;

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        fn commission(rate: &u32, body: &mut Vec<u8>) -> Result<()> {
            put_u32_be(body, *rate);
            Ok(())
        }

        let mut fields = OptionalFields::new();
        fields.field(self.stake.as_ref(), |stake, body| {
            put_u64_be(body, stake.micro_ccd());
            Ok(())
        })?;
        fields.field(self.restake_earnings.as_ref(), |restake, body| {
            put_bool(body, *restake);
            Ok(())
        })?;
        fields.field(self.open_for_delegation.as_ref(), |status, body| {
            put_u8(body, *status as u8);
            Ok(())
        })?;
        fields.field(self.keys.as_ref(), |keys, body| {
            keys.serialize_into(body);
            Ok(())
        })?;
        fields.field(self.metadata_url.as_ref(), |url, body| {
            put_bytes_u16_be_len(body, "metadata url", url.as_bytes())
        })?;
        fields.field(self.transaction_fee_commission.as_ref(), commission)?;
        fields.field(self.baking_reward_commission.as_ref(), commission)?;
        fields.field(self.finalization_reward_commission.as_ref(), commission)?;
        fields.field(self.suspended.as_ref(), |suspended, body| {
            put_bool(body, *suspended);
            Ok(())
        })?;
        fields.finish(out);
        Ok(())
    }

    fn base_energy_cost(&self) -> Result<Energy> {
        if self.keys.is_some() {
            Ok(Energy::new(CONFIGURE_BAKER_WITH_KEYS_COST))
        } else {
            Ok(Energy::new(SIMPLE_TRANSFER_BASE_COST))
        }
    }
}

// ---------------------------------------------------------------------------
// AccountTransactionPayload
// ---------------------------------------------------------------------------

/// Any account transaction payload, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountTransactionPayload {
    DeployModule(DeployModule),
    InitContract(InitContract),
    Update(UpdateContract),
    Transfer(Transfer),
    UpdateCredentials(UpdateCredentials),
    RegisterData(RegisterData),
    TransferWithMemo(TransferWithMemo),
    ConfigureBaker(ConfigureBaker),
    ConfigureDelegation(ConfigureDelegation),
}

/// Runs `$body` with `$payload` bound to the inner value of any variant.
macro_rules! dispatch {
    ($self:expr, $payload:ident => $body:expr) => {
        match $self {
            AccountTransactionPayload::DeployModule($payload) => $body,
            AccountTransactionPayload::InitContract($payload) => $body,
            AccountTransactionPayload::Update($payload) => $body,
            AccountTransactionPayload::Transfer($payload) => $body,
            AccountTransactionPayload::UpdateCredentials($payload) => $body,
            AccountTransactionPayload::RegisterData($payload) => $body,
            AccountTransactionPayload::TransferWithMemo($payload) => $body,
            AccountTransactionPayload::ConfigureBaker($payload) => $body,
            AccountTransactionPayload::ConfigureDelegation($payload) => $body,
        }
    };
}

fn read_body<P: PayloadCodec>(bytes: &[u8]) -> Result<P> {
    let mut reader = Reader::new(bytes);
    let payload = P::read_from(&mut reader)?;
    reader.finish()?;
    Ok(payload)
}

impl AccountTransactionPayload {
    pub fn kind(&self) -> AccountTransactionType {
        match self {
            Self::DeployModule(_) => DeployModule::KIND,
            Self::InitContract(_) => InitContract::KIND,
            Self::Update(_) => UpdateContract::KIND,
            Self::Transfer(_) => Transfer::KIND,
            Self::UpdateCredentials(_) => UpdateCredentials::KIND,
            Self::RegisterData(_) => RegisterData::KIND,
            Self::TransferWithMemo(_) => TransferWithMemo::KIND,
            Self::ConfigureBaker(_) => ConfigureBaker::KIND,
            Self::ConfigureDelegation(_) => ConfigureDelegation::KIND,
        }
    }

    /// The payload body without its kind tag.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        dispatch!(self, payload => payload.to_bytes())
    }

    /// `kind tag ‖ body`, the form that follows the transaction header.
    pub fn serialize_tagged(&self) -> Result<Vec<u8>> {
        let mut out = vec![self.kind().tag()];
        dispatch!(self, payload => payload.serialize_into(&mut out))?;
        trace!(kind = %self.kind(), size = out.len(), "serialized payload");
        Ok(out)
    }

    /// Fails only when the kind-specific cost overflows 64 bits.
    pub fn base_energy_cost(&self) -> Result<Energy> {
        dispatch!(self, payload => payload.base_energy_cost())
    }

    /// Reads a payload body of the given kind. The whole buffer must be
    /// consumed.
    pub fn deserialize(kind: AccountTransactionType, bytes: &[u8]) -> Result<Self> {
        use AccountTransactionType as Kind;
        let payload = match kind {
            Kind::DeployModule => Self::DeployModule(read_body(bytes)?),
            Kind::InitContract => Self::InitContract(read_body(bytes)?),
            Kind::Update => Self::Update(read_body(bytes)?),
            Kind::Transfer => Self::Transfer(read_body(bytes)?),
            Kind::UpdateCredentials => Self::UpdateCredentials(read_body(bytes)?),
            Kind::RegisterData => Self::RegisterData(read_body(bytes)?),
            Kind::TransferWithMemo => Self::TransferWithMemo(read_body(bytes)?),
            Kind::ConfigureBaker => Self::ConfigureBaker(read_body(bytes)?),
            Kind::ConfigureDelegation => Self::ConfigureDelegation(read_body(bytes)?),
        };
        debug!(kind = %kind, size = bytes.len(), "deserialized payload");
        Ok(payload)
    }

    /// Reads `kind tag ‖ body`.
    pub fn deserialize_tagged(bytes: &[u8]) -> Result<Self> {
        let (tag, body) = bytes
            .split_first()
            .ok_or_else(|| CodecError::decode("empty payload"))?;
        Self::deserialize(AccountTransactionType::try_from(*tag)?, body)
    }
}

macro_rules! payload_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {$(
        impl From<$ty> for AccountTransactionPayload {
            fn from(payload: $ty) -> Self {
                Self::$variant(payload)
            }
        }
    )*};
}

payload_from!(
    DeployModule(DeployModule),
    InitContract(InitContract),
    Update(UpdateContract),
    Transfer(Transfer),
    UpdateCredentials(UpdateCredentials),
    RegisterData(RegisterData),
    TransferWithMemo(TransferWithMemo),
    ConfigureBaker(ConfigureBaker),
    ConfigureDelegation(ConfigureDelegation),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> AccountAddress {
        AccountAddress::from_base58("4hXCdgNTxgM7LNm8nFJEfjDhEcyjjqQnPSRyBS9QgmHKQVxKRf").unwrap()
    }

    #[test]
    fn transfer_layout() {
        let payload = Transfer {
            to_address: recipient(),
            amount: CcdAmount::from_micro_ccd(1_000_000),
        };
        let bytes = payload.to_bytes().unwrap();
        assert_eq!(
            hex::encode(bytes),
            "e718721402249e81f8fedcba6027f1c9bcb4445e9433b7905d579d83ececb198 00000000000f4240"
                .replace(' ', "")
        );
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(300));
    }

    #[test]
    fn transfer_with_memo_layout() {
        let payload = TransferWithMemo {
            to_address: AccountAddress::new([0; 32]),
            memo: DataBlob::new(vec![0xab, 0xcd]).unwrap(),
            amount: CcdAmount::from_micro_ccd(5),
        };
        let bytes = payload.to_bytes().unwrap();
        assert_eq!(&bytes[32..], &[0, 2, 0xab, 0xcd, 0, 0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn simple_kinds_decode_exactly() {
        let payloads: Vec<AccountTransactionPayload> = vec![
            Transfer {
                to_address: recipient(),
                amount: CcdAmount::from_micro_ccd(42),
            }
            .into(),
            TransferWithMemo {
                to_address: recipient(),
                memo: DataBlob::new(b"invoice 17".to_vec()).unwrap(),
                amount: CcdAmount::from_micro_ccd(u64::MAX),
            }
            .into(),
            RegisterData {
                data: DataBlob::new(vec![7; 256]).unwrap(),
            }
            .into(),
        ];
        for payload in payloads {
            let tagged = payload.serialize_tagged().unwrap();
            assert_eq!(tagged[0], payload.kind().tag());
            assert_eq!(AccountTransactionPayload::deserialize_tagged(&tagged).unwrap(), payload);
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut body = RegisterData {
            data: DataBlob::new(vec![1, 2]).unwrap(),
        }
        .to_bytes()
        .unwrap();
        body.push(0);
        assert!(matches!(
            AccountTransactionPayload::deserialize(AccountTransactionType::RegisterData, &body),
            Err(CodecError::Decode { .. })
        ));
    }

    #[test]
    fn truncated_transfer_is_rejected() {
        assert!(matches!(
            AccountTransactionPayload::deserialize(AccountTransactionType::Transfer, &[0; 39]),
            Err(CodecError::Decode { .. })
        ));
    }

    #[test]
    fn complex_kinds_refuse_to_decode() {
        for kind in [
            AccountTransactionType::DeployModule,
            AccountTransactionType::InitContract,
            AccountTransactionType::Update,
            AccountTransactionType::UpdateCredentials,
            AccountTransactionType::ConfigureBaker,
            AccountTransactionType::ConfigureDelegation,
        ] {
            assert_eq!(
                AccountTransactionPayload::deserialize(kind, &[0, 0, 0]),
                Err(CodecError::UnsupportedOperation { kind })
            );
        }
    }

    #[test]
    fn deploy_module_versioned() {
        let payload = DeployModule {
            version: Some(1),
            source: HexBytes::new(vec![0xaa; 25]),
        };
        let bytes = payload.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 1, 0, 0, 0, 25]);
        assert_eq!(&bytes[8..], &[0xaa; 25][..]);
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(2));
    }

    #[test]
    fn deploy_module_with_embedded_header() {
        let mut source = vec![0, 0, 0, 1, 0, 0, 0, 29];
        source.extend([0xbb; 29]);
        let payload = DeployModule {
            version: None,
            source: HexBytes::new(source.clone()),
        };
        assert_eq!(payload.to_bytes().unwrap(), source);
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(2));
    }

    #[test]
    fn init_contract_layout() {
        let payload = InitContract {
            amount: CcdAmount::from_micro_ccd(0),
            module_ref: ModuleReference::new([0x44; 32]),
            init_name: ContractName::new("weather").unwrap(),
            param: Parameter::new(vec![1]).unwrap(),
            max_contract_execution_energy: Energy::new(30_000),
        };
        let bytes = payload.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &[0; 8]);
        assert_eq!(&bytes[8..40], &[0x44; 32]);
        assert_eq!(&bytes[40..42], &[0, 12]);
        assert_eq!(&bytes[42..54], b"init_weather");
        assert_eq!(&bytes[54..], &[0, 1, 1]);
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(30_000));
    }

    #[test]
    fn update_contract_layout() {
        let payload = UpdateContract {
            amount: CcdAmount::from_micro_ccd(1),
            address: ContractAddress::new(81, 0),
            receive_name: ReceiveName::new("weather.set").unwrap(),
            message: Parameter::empty(),
            max_contract_execution_energy: Energy::new(5_000),
        };
        let bytes = payload.to_bytes().unwrap();
        assert_eq!(
            hex::encode(&bytes[..26]),
            "0000000000000001 0000000000000051 0000000000000000 000b".replace(' ', "")
        );
        assert_eq!(&bytes[26..37], b"weather.set");
        assert_eq!(&bytes[37..], &[0, 0]);
    }

    fn credential(index: u8, key_count: u8) -> IndexedCredentialDeploymentInfo {
        use crate::credential::values::tests::sample_values;
        use crate::credential::{CredentialDeploymentInfo, Ed25519PublicKey, VerifyKey};

        let mut values = sample_values(&[]);
        for key in 1..key_count {
            values
                .credential_public_keys
                .keys
                .insert(key, VerifyKey::ed25519(Ed25519PublicKey::new([key; 32])));
        }
        IndexedCredentialDeploymentInfo {
            index,
            cdi: CredentialDeploymentInfo {
                values,
                proofs: HexBytes::new(vec![0xee; 4]),
            },
        }
    }

    #[test]
    fn update_credentials_layout_and_energy() {
        let added = credential(4, 1);
        let payload = UpdateCredentials {
            new_credentials: vec![added.clone()],
            remove_credential_ids: vec![CredentialRegistrationId::new([0x55; 48])],
            threshold: 2,
            current_number_of_credentials: 1,
        };

        let mut expected = vec![1, 4];
        expected.extend(added.cdi.serialize().unwrap());
        expected.push(1);
        expected.extend_from_slice(&[0x55; 48]);
        expected.push(2);
        assert_eq!(payload.to_bytes().unwrap(), expected);

        // 500 base + 500 per existing + 54000 + 100 per key of each new one
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(55_100));
    }

    #[test]
    fn update_credentials_energy_counts_every_key() {
        let first = credential(1, 3);
        let second = credential(2, 1);
        let payload = UpdateCredentials {
            new_credentials: vec![first.clone(), second.clone()],
            remove_credential_ids: vec![],
            threshold: 1,
            current_number_of_credentials: 0,
        };
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(108_900));

        let bytes = payload.to_bytes().unwrap();
        let first_len = first.cdi.serialize().unwrap().len();
        assert_eq!(&bytes[..2], &[2, 1]);
        assert_eq!(bytes[2 + first_len], 2);
        assert_eq!(&bytes[bytes.len() - 2..], &[0, 1]);
    }

    #[test]
    fn update_credentials_energy_overflow_is_an_error() {
        let payload = UpdateCredentials {
            new_credentials: vec![credential(1, 1)],
            remove_credential_ids: vec![],
            threshold: 1,
            current_number_of_credentials: u64::MAX,
        };
        assert!(matches!(
            payload.base_energy_cost(),
            Err(CodecError::InvalidValue { .. })
        ));
        let tagged = AccountTransactionPayload::UpdateCredentials(payload);
        assert!(tagged.base_energy_cost().is_err());
    }

    #[test]
    fn delegation_bitmap_tracks_set_fields() {
        let payload = ConfigureDelegation {
            stake: None,
            restake_earnings: Some(true),
            delegation_target: Some(DelegationTarget::Baker { baker_id: 7 }),
        };
        assert_eq!(
            hex::encode(payload.to_bytes().unwrap()),
            "0006 01 01 0000000000000007".replace(' ', "")
        );

        let passive = ConfigureDelegation {
            stake: Some(CcdAmount::from_micro_ccd(10)),
            restake_earnings: None,
            delegation_target: Some(DelegationTarget::Passive),
        };
        assert_eq!(
            hex::encode(passive.to_bytes().unwrap()),
            "0005 000000000000000a 00".replace(' ', "")
        );
        assert_eq!(ConfigureDelegation::default().to_bytes().unwrap(), vec![0, 0]);
    }

    #[test]
    fn baker_bitmap_and_cost() {
        let without_keys = ConfigureBaker {
            open_for_delegation: Some(OpenStatus::ClosedForNew),
            metadata_url: Some("https://x".to_string()),
            finalization_reward_commission: Some(100),
            suspended: Some(false),
            ..Default::default()
        };
        assert_eq!(
            hex::encode(without_keys.to_bytes().unwrap()),
            "0194 01 0009 68747470733a2f2f78 00000064 00".replace(' ', "")
        );
        assert_eq!(without_keys.base_energy_cost().unwrap(), Energy::new(300));

        let with_keys = ConfigureBaker {
            keys: Some(BakerKeysWithProofs {
                election_verify_key: BakerVerifyKey::new([1; 32]),
                proof_election: KeyProof::new([2; 64]),
                signature_verify_key: BakerVerifyKey::new([3; 32]),
                proof_sig: KeyProof::new([4; 64]),
                aggregation_verify_key: BakerAggregationVerifyKey::new([5; 96]),
                proof_aggregation: KeyProof::new([6; 64]),
            }),
            ..Default::default()
        };
        let bytes = with_keys.to_bytes().unwrap();
        assert_eq!(&bytes[..2], &[0, 8]);
        assert_eq!(bytes.len(), 2 + 32 + 64 + 32 + 64 + 96 + 64);
        assert_eq!(with_keys.base_energy_cost().unwrap(), Energy::new(4_050));
    }

    #[test]
    fn delegation_target_json() {
        let target: DelegationTarget =
            serde_json::from_str(r#"{"delegateType":"Baker","bakerId":3}"#).unwrap();
        assert_eq!(target, DelegationTarget::Baker { baker_id: 3 });
        let passive: DelegationTarget = serde_json::from_str(r#"{"delegateType":"Passive"}"#).unwrap();
        assert_eq!(passive, DelegationTarget::Passive);
    }
}
