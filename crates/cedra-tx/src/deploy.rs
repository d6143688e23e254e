//! Move package deployment.
//!
//! A compiled package is published through the publisher's own
//! `deployer::deploy_derived` entry function, which creates a resource
//! account derived from the publisher address and a seed.

use std::fs;
use std::path::{Path, PathBuf};

use cedra_tx_core::canonical::{encode_byte_vectors, encode_bytes};
use cedra_tx_core::{derive_resource_address, AccountAddress, TransactionPayload};
use tracing::debug;

use crate::error::Result;

/// Module holding the deploy entry function.
pub const DEPLOYER_MODULE: &str = "deployer";

/// Entry function publishing a package to a derived resource account.
pub const DEPLOY_FUNCTION: &str = "deploy_derived";

/// Package metadata file in a build directory.
pub const METADATA_FILE: &str = "package-metadata.bcs";

/// Directory of compiled modules in a build directory.
pub const MODULES_DIR: &str = "bytecode_modules";

/// Extension of compiled module files.
pub const MODULE_EXTENSION: &str = "mv";

/// A compiled Move package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub metadata: Vec<u8>,
    /// Module bytecode, ordered by file name.
    pub modules: Vec<Vec<u8>>,
}

/// Read a package build directory: `package-metadata.bcs` and every
/// `bytecode_modules/*.mv`.
pub fn load_package(dir: impl AsRef<Path>) -> Result<Package> {
    let dir = dir.as_ref();
    let metadata = fs::read(dir.join(METADATA_FILE))?;

    let mut paths: Vec<PathBuf> = fs::read_dir(dir.join(MODULES_DIR))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == MODULE_EXTENSION));
    paths.sort();

    let modules = paths
        .iter()
        .map(fs::read)
        .collect::<std::io::Result<Vec<_>>>()?;

    debug!(dir = %dir.display(), modules = modules.len(), "loaded package");
    Ok(Package { metadata, modules })
}

impl Package {
    /// Payload deploying this package from `publisher` with `seed`.
    pub fn deploy_payload(&self, publisher: AccountAddress, seed: &[u8]) -> TransactionPayload {
        deploy_payload(publisher, &self.metadata, &self.modules, seed)
    }
}

/// `<publisher>::deployer::deploy_derived(metadata, modules, seed)`.
pub fn deploy_payload(
    publisher: AccountAddress,
    metadata: &[u8],
    modules: &[Vec<u8>],
    seed: &[u8],
) -> TransactionPayload {
    TransactionPayload::new(publisher, DEPLOYER_MODULE, DEPLOY_FUNCTION)
        .arg(encode_bytes(metadata))
        .arg(encode_byte_vectors(modules))
        .arg(encode_bytes(seed))
}

/// Address the package will be published at.
pub fn deployment_address(publisher: AccountAddress, seed: &[u8]) -> Result<AccountAddress> {
    Ok(derive_resource_address(publisher.as_bytes(), seed)?)
}
