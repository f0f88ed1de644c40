use color_eyre::Report;
use snapshot_lib::rpc::CallBlock;
use snapshot_lib::{BlockNumber, ContractAddress};
use std::path::PathBuf;
use structopt::StructOpt;
use vepul_toolbox::networks::Network;
use vepul_toolbox::plot::Viewer;
use vepul_toolbox::settings::{PartialSettings, Settings};

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct SamplingArgs {
    /// Path to a json configuration file, command line values take precedence
    #[structopt(long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of the node. Calls evaluated at the sampled blocks
    /// require a node keeping historical state.
    #[structopt(long, env = "ETH_RPC_URL")]
    rpc_url: Option<String>,

    /// Use the vePUL deployment of a known network (ethereum, pulsarr-test)
    #[structopt(long)]
    network: Option<Network>,

    /// Address of the contract to query
    #[structopt(long)]
    contract: Option<ContractAddress>,

    /// First sampled block
    #[structopt(long)]
    start_block: Option<BlockNumber>,

    /// Number of sampled blocks
    #[structopt(long)]
    samples: Option<usize>,

    /// Solidity signature of the accessor, taking the block number as only argument
    #[structopt(long)]
    method: Option<String>,

    /// Evaluate calls at the sampled block (sampled) or at the chain head (latest)
    #[structopt(long)]
    call_at: Option<CallBlock>,

    /// Last sampled block, the chain height reported by the node when omitted
    #[structopt(long)]
    pub current_block: Option<BlockNumber>,
}

impl SamplingArgs {
    pub fn settings(
        &self,
        output: Option<PathBuf>,
        viewer: Option<Viewer>,
    ) -> Result<Settings, Report> {
        let cli = PartialSettings {
            rpc_url: self.rpc_url.clone(),
            network: self.network,
            contract: self.contract,
            start_block: self.start_block,
            samples: self.samples,
            method: self.method.clone(),
            call_at: self.call_at,
            output,
            viewer,
        };
        Ok(Settings::load(cli, self.config.as_deref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // Both cases touch ETH_RPC_URL, keep them in one test so they don't race.
    #[test]
    fn rpc_url_precedence() {
        let file = config_file(r#"{ "rpc_url": "http://file:8545" }"#);
        let config = file.path().to_str().unwrap();
        std::env::set_var("ETH_RPC_URL", "http://env:8545");

        let args = SamplingArgs::from_iter_safe(["samples", "--config", config]).unwrap();
        let settings = args.settings(None, None).unwrap();
        assert_eq!(settings.rpc_url, "http://env:8545");

        let args = SamplingArgs::from_iter_safe([
            "samples",
            "--config",
            config,
            "--rpc-url",
            "http://flag:8545",
        ])
        .unwrap();
        let settings = args.settings(None, None).unwrap();
        assert_eq!(settings.rpc_url, "http://flag:8545");

        std::env::remove_var("ETH_RPC_URL");
        let args = SamplingArgs::from_iter_safe(["samples", "--config", config]).unwrap();
        let settings = args.settings(None, None).unwrap();
        assert_eq!(settings.rpc_url, "http://file:8545");
    }
}
