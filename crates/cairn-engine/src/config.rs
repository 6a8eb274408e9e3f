use std::path::PathBuf;

/// Configuration for an [`crate::Engine`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Path of the snapshot file loaded at open and written at shutdown.
    pub savefile: PathBuf,
    /// Whether persistence is enabled. Off by default: the store is purely
    /// in-memory unless the embedder opts in.
    pub persist: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            savefile: PathBuf::from(".cairn.snapshot"),
            persist: false,
        }
    }
}

impl EngineConfig {
    /// A configuration with persistence enabled at the given path.
    pub fn persistent(savefile: impl Into<PathBuf>) -> Self {
        Self {
            savefile: savefile.into(),
            persist: true,
        }
    }
}
