//! # Facade Client
//!
//! One client over two managed services. Every method resolves a key trait to
//! a collection/document or bucket/object address and forwards the call to the
//! backing SDK crate, surfacing its result unchanged.

use firestore::FirestoreDb;
use google_cloud_storage::client::{Client as StorageClient, ClientConfig as StorageClientConfig};
use tracing::info;

use crate::config::FireblobConfig;
use crate::error::{ClientError, ClientResult};

pub mod buckets;
pub mod documents;
pub mod objects;

pub use objects::ObjectLocation;

/// Facade over a Firestore database and a Cloud Storage project
///
/// Holds one long-lived handle per service; both are cheap to clone and safe
/// for concurrent use to the extent the SDK crates document. The facade adds
/// no locking or retry logic of its own.
///
/// # Examples
///
/// ```rust,no_run
/// use fireblob::{FireblobClient, FireblobConfig, Key};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FireblobClient::new(FireblobConfig::new("my-project")).await?;
///
/// let report = Key::new("reports", "q3");
/// client.delete_doc(&report).await?;
/// client.delete_object(&report).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FireblobClient {
    project_id: String,
    store: FirestoreDb,
    blob: StorageClient,
}

impl std::fmt::Debug for FireblobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireblobClient")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl FireblobClient {
    /// Create a new facade client for the configured project
    ///
    /// Builds both backing SDK clients up front. Credential discovery is the
    /// SDK crates' own (application-default credentials, metadata server,
    /// emulator variables); failures surface as configuration errors.
    pub async fn new(config: FireblobConfig) -> ClientResult<Self> {
        config.validate()?;

        let store = FirestoreDb::new(&config.project_id).await?;

        let storage_config = if config.anonymous {
            StorageClientConfig::default().anonymous()
        } else {
            StorageClientConfig::default()
                .with_auth()
                .await
                .map_err(|e| {
                    ClientError::config_error(format!("object store credentials: {e}"))
                })?
        };
        let blob = StorageClient::new(storage_config);

        info!(
            project_id = %config.project_id,
            anonymous = config.anonymous,
            "Created fireblob client"
        );

        Ok(Self {
            project_id: config.project_id,
            store,
            blob,
        })
    }

    /// Project the client addresses for bucket creation and enumeration
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub(crate) fn store(&self) -> &FirestoreDb {
        &self.store
    }

    pub(crate) fn blob(&self) -> &StorageClient {
        &self.blob
    }
}
