pub mod networks;
pub mod plot;
pub mod settings;
pub mod stats;
pub mod utils;
