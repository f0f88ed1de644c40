//! Blocking Ethereum JSON-RPC access to a node.

use crate::{reader::HistoricalChainReader, BlockNumber, ContractAddress, RawVotingPower};
use num_bigint::BigUint;
use reqwest::blocking::Client;
use reqwest::StatusCode;
pub use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Solidity signature of the historical total supply accessor.
pub const DEFAULT_METHOD: &str = "totalSupplyAt(uint256)";

const WORD_LENGTH: usize = 32;

pub type Selector = [u8; 4];

/// `selector(DEFAULT_METHOD)`
const DEFAULT_SELECTOR: Selector = [0x98, 0x1b, 0x24, 0xd0];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not reach the rpc endpoint")]
    Transport(#[from] reqwest::Error),

    #[error("rpc endpoint answered with http status {0}")]
    Status(StatusCode),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("response to {0} carries no result")]
    MissingResult(String),

    #[error("invalid hex quantity {0:?}")]
    InvalidQuantity(String),

    #[error("invalid hex data")]
    InvalidData(#[from] hex::FromHexError),

    #[error("call to {0} returned no data, the address holds no contract or the call reverted")]
    EmptyReturn(ContractAddress),

    #[error("call returned {0} bytes, expected at least 32")]
    ShortReturn(usize),

    #[error("invalid method signature {0:?}")]
    InvalidSignature(String),
}

/// State against which the accessor is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallBlock {
    /// Chain head, the sampled block is only passed as the method argument.
    Latest,
    /// The sampled block itself. Requires a node keeping historical state.
    #[default]
    Sampled,
}

impl CallBlock {
    fn tag(self, block: BlockNumber) -> String {
        match self {
            CallBlock::Latest => "latest".to_string(),
            CallBlock::Sampled => quantity(block),
        }
    }
}

impl FromStr for CallBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(CallBlock::Latest),
            "sampled" => Ok(CallBlock::Sampled),
            other => Err(format!(
                "unknown call block {:?}, expected latest or sampled",
                other
            )),
        }
    }
}

impl fmt::Display for CallBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallBlock::Latest => f.write_str("latest"),
            CallBlock::Sampled => f.write_str("sampled"),
        }
    }
}

/// First four bytes of the keccak-256 hash of a method signature such as
/// `totalSupplyAt(uint256)`.
pub fn selector(signature: &str) -> Result<Selector, Error> {
    let signature = signature.trim();
    let well_formed = signature
        .find('(')
        .map(|open| open > 0 && signature.ends_with(')'))
        .unwrap_or(false);
    if !well_formed || signature.contains(char::is_whitespace) {
        return Err(Error::InvalidSignature(signature.to_string()));
    }

    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = Selector::default();
    let len = selector.len();
    selector.copy_from_slice(&hash[..len]);
    Ok(selector)
}

/// ABI encoding of a call taking a single `uint256` argument.
pub fn encode_uint_call(selector: Selector, argument: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(selector.len() + WORD_LENGTH);
    data.extend_from_slice(&selector);
    data.extend_from_slice(&[0u8; WORD_LENGTH - 8]);
    data.extend_from_slice(&argument.to_be_bytes());
    data
}

/// Decodes the first word of the return data as an unsigned integer.
pub fn decode_uint(data: &[u8]) -> Result<BigUint, Error> {
    if data.len() < WORD_LENGTH {
        return Err(Error::ShortReturn(data.len()));
    }
    Ok(BigUint::from_bytes_be(&data[..WORD_LENGTH]))
}

fn quantity(value: u64) -> String {
    format!("0x{:x}", value)
}

fn parse_quantity(value: &str) -> Result<u64, Error> {
    value
        .strip_prefix("0x")
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .ok_or_else(|| Error::InvalidQuantity(value.to_string()))
}

fn parse_data(value: &str) -> Result<Vec<u8>, Error> {
    Ok(hex::decode(value.trim_start_matches("0x"))?)
}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct Response {
    result: Option<String>,
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
}

/// [`HistoricalChainReader`] backed by a node's JSON-RPC endpoint.
///
/// Requests are sent one at a time and block until the node answers.
pub struct JsonRpcReader {
    client: Client,
    url: Url,
    selector: Selector,
    call_block: CallBlock,
    next_id: AtomicU64,
}

impl JsonRpcReader {
    pub fn new(url: Url) -> Result<Self, Error> {
        Ok(Self::with_client(Client::builder().build()?, url))
    }

    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            selector: DEFAULT_SELECTOR,
            call_block: CallBlock::default(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Use the accessor with the given Solidity signature instead of
    /// [`DEFAULT_METHOD`].
    pub fn with_method(mut self, signature: &str) -> Result<Self, Error> {
        self.selector = selector(signature)?;
        Ok(self)
    }

    pub fn with_call_block(mut self, call_block: CallBlock) -> Self {
        self.call_block = call_block;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Height of the latest block known to the node.
    pub fn block_number(&self) -> Result<BlockNumber, Error> {
        let result = self.request("eth_blockNumber", json!([]))?;
        parse_quantity(&result)
    }

    /// Read-only call of `contract` with `data` evaluated against the state at `tag`.
    pub fn call(
        &self,
        contract: &ContractAddress,
        data: &[u8],
        tag: &str,
    ) -> Result<Vec<u8>, Error> {
        let params = json!([
            {
                "to": contract.to_string(),
                "data": format!("0x{}", hex::encode(data)),
            },
            tag,
        ]);
        let result = parse_data(&self.request("eth_call", params)?)?;
        if result.is_empty() {
            return Err(Error::EmptyReturn(*contract));
        }
        Ok(result)
    }

    fn request(&self, method: &str, params: Value) -> Result<String, Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, method, "sending rpc request");
        trace!(id, %params, "rpc request parameters");

        let response = self
            .client
            .post(self.url.clone())
            .json(&Request {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
            .send()?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }

        let Response { result, error } = response.json()?;
        if let Some(ErrorObject { code, message }) = error {
            return Err(Error::Rpc { code, message });
        }
        trace!(id, ?result, "rpc response");
        result.ok_or_else(|| Error::MissingResult(method.to_string()))
    }
}

impl HistoricalChainReader for JsonRpcReader {
    type Error = Error;

    fn total_supply_at(
        &self,
        contract: &ContractAddress,
        block: BlockNumber,
    ) -> Result<RawVotingPower, Self::Error> {
        let data = encode_uint_call(self.selector, block);
        let result = self.call(contract, &data, &self.call_block.tag(block))?;
        decode_uint(&result)
    }
}
