// crates/cargocoin-cli/src/config.rs
//
// Genesis configuration for a local CargoCoin ledger.
// Loaded from a TOML file; optional fields fall back to sensible defaults.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use cargocoin_core::{Address, Amount};

use crate::script::{parse_amount, ScriptError};

/// Genesis parameters plus CLI settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GenesisConfig {
    /// Account receiving ADMIN, PAUSER, and UPGRADER. Name or hex address.
    pub admin: String,

    /// Account receiving MINTER. Name or hex address.
    pub minter: String,

    /// Amount minted to the admin at initialization, e.g. "600000000" or
    /// "1500 units". Zero mints nothing.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: String,

    /// Logic version the ledger is deployed with: "CargoCoin" or "CargoCoinL1".
    #[serde(default = "default_logic")]
    pub logic: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where the ledger snapshot is persisted between invocations.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Named accounts usable anywhere an address is expected.
    #[serde(default)]
    pub accounts: BTreeMap<String, Address>,
}

fn default_initial_supply() -> String {
    "0".to_string()
}

fn default_logic() -> String {
    "CargoCoin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_snapshot_path() -> String {
    "~/.cargocoin/ledger.json".to_string()
}

impl GenesisConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: GenesisConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn book(&self) -> AccountBook {
        AccountBook {
            names: self.accounts.clone(),
        }
    }

    pub fn initial_supply(&self) -> Result<Amount, ScriptError> {
        parse_amount(&self.initial_supply)
    }

    /// Snapshot location with a leading `~` expanded to the home directory.
    pub fn snapshot_file(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        expand_home(&self.snapshot_path)
    }
}

fn expand_home(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().ok_or("Could not determine home directory")?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Resolves account names from the config to addresses, and back for display.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    names: BTreeMap<String, Address>,
}

impl AccountBook {
    /// A configured name, or a literal hex address.
    pub fn resolve(&self, name_or_address: &str) -> Result<Address, ScriptError> {
        if let Some(address) = self.names.get(name_or_address) {
            return Ok(*address);
        }
        name_or_address
            .parse()
            .map_err(|_| ScriptError::UnknownAccount(name_or_address.to_string()))
    }

    pub fn label(&self, address: &Address) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, a)| *a == address)
            .map(|(name, _)| name.as_str())
    }

    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.names.values()
    }
}
