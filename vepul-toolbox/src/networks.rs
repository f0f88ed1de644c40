use serde::Deserialize;
use snapshot_lib::ContractAddress;
use std::fmt;
use std::str::FromStr;

/// Networks with a known vePUL deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Ethereum,
    PulsarrTest,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Ethereum, Network::PulsarrTest];

    pub fn name(self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::PulsarrTest => "pulsarr-test",
        }
    }

    /// Address of the vePUL contract deployed on this network.
    pub fn vepul(self) -> ContractAddress {
        match self {
            // 0xB56A454d8DaC2AD4cB82337887717a2a427Fcd00
            Network::Ethereum => ContractAddress::new([
                0xb5, 0x6a, 0x45, 0x4d, 0x8d, 0xac, 0x2a, 0xd4, 0xcb, 0x82, 0x33, 0x78, 0x87, 0x71,
                0x7a, 0x2a, 0x42, 0x7f, 0xcd, 0x00,
            ]),
            // 0xC22Af3F30a22c6c02dC4C9a9AcF5c337Fad4Aa1F
            Network::PulsarrTest => ContractAddress::new([
                0xc2, 0x2a, 0xf3, 0xf3, 0x0a, 0x22, 0xc6, 0xc0, 0x2d, 0xc4, 0xc9, 0xa9, 0xac, 0xf5,
                0xc3, 0x37, 0xfa, 0xd4, 0xaa, 0x1f,
            ]),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|network| network.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown network {:?}, expected one of: {}",
                    s,
                    Self::ALL.map(Network::name).join(", ")
                )
            })
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
