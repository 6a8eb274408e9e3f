//! Engine lifecycle: open → serve → shutdown.

use std::sync::Arc;

use tracing::info;

use cairn_snapshot::RepositorySnapshot;
use cairn_store::Repository;

use crate::config::EngineConfig;
use crate::error::EngineResult;

/// One repository wired to its snapshot file.
///
/// The engine is what an embedding layer (an HTTP service, a test harness)
/// holds: it owns the [`Repository`] and the persistence configuration, and
/// runs the load-at-open / save-at-shutdown lifecycle. Request traffic goes
/// straight to the shared repository handle; the engine itself sits outside
/// the per-request path.
pub struct Engine {
    repository: Arc<Repository>,
    config: EngineConfig,
}

impl Engine {
    /// Open an engine: construct the repository and, when persistence is
    /// enabled, load the snapshot file. An absent file starts empty; a
    /// corrupt file is an error, and the caller decides whether to abort or
    /// retry with persistence disabled.
    pub fn open(config: EngineConfig) -> EngineResult<Self> {
        let repository = Arc::new(Repository::new());
        if config.persist {
            match RepositorySnapshot::read_from(&config.savefile)? {
                Some(snapshot) => {
                    snapshot.restore(&repository)?;
                    info!(
                        path = %config.savefile.display(),
                        databases = repository.database_count(),
                        stacks = snapshot.stack_count(),
                        "snapshot loaded"
                    );
                }
                None => {
                    info!(
                        path = %config.savefile.display(),
                        "no snapshot file, starting empty"
                    );
                }
            }
        }
        Ok(Self { repository, config })
    }

    /// The shared repository handle.
    pub fn repository(&self) -> &Arc<Repository> {
        &self.repository
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Capture and write a snapshot. A no-op when persistence is disabled.
    pub fn save(&self) -> EngineResult<()> {
        if !self.config.persist {
            return Ok(());
        }
        let snapshot = RepositorySnapshot::capture(&self.repository)?;
        snapshot.write_to(&self.config.savefile)?;
        info!(
            path = %self.config.savefile.display(),
            databases = snapshot.databases.len(),
            stacks = snapshot.stack_count(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Final save, consuming the engine. Called at graceful-stop time.
    pub fn shutdown(self) -> EngineResult<()> {
        self.save()
    }
}
