// crates/cargocoin-cli/src/snapshot.rs
//
// Ledger persistence between CLI invocations: the full `LedgerSnapshot`
// (storage plus event log) as pretty JSON.

use std::fs;
use std::path::Path;

use cargocoin_ledger::{Ledger, LedgerSnapshot};

pub fn load(path: &Path) -> Result<Ledger, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!(
            "No ledger at {}. Run `cargocoin init` first.",
            path.display()
        )
        .into());
    }
    let contents = fs::read_to_string(path)?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&contents)?;
    let ledger = Ledger::from_snapshot(snapshot)?;
    tracing::debug!(
        "Loaded ledger from {} ({} events)",
        path.display(),
        ledger.events().len()
    );
    Ok(ledger)
}

pub fn save(ledger: &Ledger, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&ledger.snapshot())?;
    fs::write(path, json)?;
    tracing::debug!("Saved ledger to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargocoin_core::Address;
    use cargocoin_ledger::CargoCoinV1;
    use primitive_types::U256;
    use std::sync::Arc;

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("cargocoin-snapshot-{}", std::process::id()));
        let path = dir.join("ledger.json");

        let mut ledger = Ledger::deploy(Arc::new(CargoCoinV1));
        let minter = Address::repeat_byte(0xb2);
        ledger
            .initialize(Address::repeat_byte(0xa1), minter, None)
            .unwrap();
        ledger
            .mint(minter, Address::repeat_byte(1), U256::from(500))
            .unwrap();

        save(&ledger, &path).unwrap();
        let restored = load(&path).unwrap();
        assert_eq!(restored.storage(), ledger.storage());
        assert_eq!(restored.events(), ledger.events());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file_mentions_init() {
        let err = load(Path::new("/nonexistent/cargocoin/ledger.json")).unwrap_err();
        assert!(err.to_string().contains("cargocoin init"));
    }
}
