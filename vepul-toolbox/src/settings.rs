use crate::networks::Network;
use crate::plot::Viewer;
use serde::Deserialize;
use snapshot_lib::rpc::{CallBlock, DEFAULT_METHOD};
use snapshot_lib::{BlockNumber, ContractAddress, SamplerConfig, DEFAULT_SAMPLES};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_START_BLOCK: BlockNumber = 10647813;
pub const DEFAULT_OUTPUT: &str = "vepul.svg";

/// 0x5f3b5DfEb7B28CDbD7FAba78963EE202a494e2A2
pub const DEFAULT_CONTRACT: ContractAddress = ContractAddress::new([
    0x5f, 0x3b, 0x5d, 0xfe, 0xb7, 0xb2, 0x8c, 0xdb, 0xd7, 0xfa, 0xba, 0x78, 0x96, 0x3e, 0xe2, 0x02,
    0xa4, 0x94, 0xe2, 0xa2,
]);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not open configuration file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One layer of optional settings, as found in a configuration file or given on
/// the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub rpc_url: Option<String>,
    pub network: Option<Network>,
    pub contract: Option<ContractAddress>,
    pub start_block: Option<BlockNumber>,
    pub samples: Option<usize>,
    pub method: Option<String>,
    pub call_at: Option<CallBlock>,
    pub output: Option<PathBuf>,
    pub viewer: Option<Viewer>,
}

impl PartialSettings {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fills the values missing from `self` with the ones from `lower`.
    ///
    /// A network named in `self` also replaces a contract coming from `lower`.
    pub fn or(self, lower: PartialSettings) -> PartialSettings {
        PartialSettings {
            rpc_url: self.rpc_url.or(lower.rpc_url),
            contract: self
                .contract
                .or_else(|| self.network.map(Network::vepul))
                .or(lower.contract),
            network: self.network.or(lower.network),
            start_block: self.start_block.or(lower.start_block),
            samples: self.samples.or(lower.samples),
            method: self.method.or(lower.method),
            call_at: self.call_at.or(lower.call_at),
            output: self.output.or(lower.output),
            viewer: self.viewer.or(lower.viewer),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rpc_url: String,
    pub contract: ContractAddress,
    pub start_block: BlockNumber,
    pub samples: usize,
    pub method: String,
    pub call_at: CallBlock,
    pub output: PathBuf,
    /// Program used to display the chart, the platform default when unset.
    pub viewer: Option<Viewer>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from(PartialSettings::default())
    }
}

impl From<PartialSettings> for Settings {
    fn from(partial: PartialSettings) -> Self {
        // an explicit contract wins over the deployment of a named network
        let contract = partial
            .contract
            .or_else(|| partial.network.map(Network::vepul))
            .unwrap_or(DEFAULT_CONTRACT);
        Settings {
            rpc_url: partial
                .rpc_url
                .unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            contract,
            start_block: partial.start_block.unwrap_or(DEFAULT_START_BLOCK),
            samples: partial.samples.unwrap_or(DEFAULT_SAMPLES),
            method: partial.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            call_at: partial.call_at.unwrap_or_default(),
            output: partial
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            viewer: partial.viewer,
        }
    }
}

impl Settings {
    /// Command line values override the configuration file, which overrides the
    /// defaults.
    pub fn load(cli: PartialSettings, config: Option<&Path>) -> Result<Self, Error> {
        let file = match config {
            Some(path) => PartialSettings::from_file(path)?,
            None => PartialSettings::default(),
        };
        Ok(cli.or(file).into())
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            contract: self.contract,
            start_block: self.start_block,
            samples: self.samples,
        }
    }
}
