//! `keystash status` — show where the vault lives and what it holds.

use crate::cli::output;
use crate::cli::{base_dir, Cli};
use crate::config::{Backend, Settings};
use crate::errors::Result;
use crate::factory;
use crate::vault::{FileSecretStore, SecretStore};

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let base = base_dir(cli)?;
    let settings = Settings::load(&base)?;

    let mut rows = vec![("Base directory", base.display().to_string())];

    match settings.backend {
        Backend::File if !settings.key_path(&base).try_exists()? => {
            // Opening the store would create the vault; report without it.
            rows.push(("Backend", FileSecretStore::NAME.to_string()));
            rows.push((
                "Secrets directory",
                settings.secrets_path(&base).display().to_string(),
            ));
            rows.push(("Master key", "not initialized".to_string()));
            rows.push(("Stored secrets", "0".to_string()));
            output::print_status_table(&rows);
            output::tip("The vault is created on the first `keystash set`.");
            return Ok(());
        }
        Backend::File => {
            let store = factory::open_file_store(&base, &settings)?;
            rows.push(("Backend", store.name().to_string()));
            rows.push(("Secrets directory", store.dir().display().to_string()));
            rows.push(("Master key", store.key_path().display().to_string()));
            rows.push(("Stored secrets", store.stored_count()?.to_string()));
        }
        Backend::Keyring => {
            let store = factory::create_store(&base, &settings)?;
            rows.push(("Backend", store.name().to_string()));
        }
    }

    output::print_status_table(&rows);
    Ok(())
}
