use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::CorpusError;
use crate::gateway::{AssistantGateway, UploadFile};
use crate::inflight::InflightGate;

/// Reachability of the assistant service, as last observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServerStatus {
    #[default]
    Checking,
    Connected,
    Disconnected,
}

#[derive(Debug, Default)]
struct CorpusState {
    documents: Vec<String>,
    status: ServerStatus,
}

/// Snapshot of the uploaded document set plus the connectivity indicator.
///
/// Clones share state; the Session Controller and every view observe the
/// same corpus.
#[derive(Clone)]
pub struct CorpusService {
    gateway: Arc<dyn AssistantGateway>,
    state: Arc<Mutex<CorpusState>>,
    uploads: InflightGate,
}

impl CorpusService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AssistantGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(CorpusState::default())),
            uploads: InflightGate::new(),
        }
    }

    fn state(&self) -> MutexGuard<'_, CorpusState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn documents(&self) -> Vec<String> {
        self.state().documents.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state().documents.is_empty()
    }

    #[must_use]
    pub fn status(&self) -> ServerStatus {
        self.state().status
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploads.is_busy()
    }

    /// Probe the service and update the connectivity indicator.
    pub async fn check_health(&self) {
        let status = match self.gateway.check_health().await {
            Ok(()) => ServerStatus::Connected,
            Err(err) => {
                tracing::warn!(error = %err, "assistant service health check failed");
                ServerStatus::Disconnected
            }
        };
        self.state().status = status;
    }

    /// Replace the local document list with the service's. A failure leaves
    /// the prior list untouched; the only user-visible effect is the
    /// connectivity indicator.
    pub async fn refresh(&self) {
        match self.gateway.list_documents().await {
            Ok(documents) => {
                let mut state = self.state();
                state.documents = documents;
                state.status = ServerStatus::Connected;
            }
            Err(err) => {
                tracing::warn!(error = %err, "document list refresh failed");
                self.state().status = ServerStatus::Disconnected;
            }
        }
    }

    /// Upload files into the corpus, then refresh the list.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::NoFiles` for an empty file set,
    /// `CorpusError::UploadInProgress` while another upload is pending, and
    /// `CorpusError::Gateway` when the service rejects the upload or cannot
    /// be reached. The document list is only mutated through the follow-up
    /// refresh on success.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<(), CorpusError> {
        if files.is_empty() {
            return Err(CorpusError::NoFiles);
        }
        let Some(_permit) = self.uploads.try_begin() else {
            return Err(CorpusError::UploadInProgress);
        };

        match self.gateway.upload(files).await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                if err.is_transport() {
                    self.state().status = ServerStatus::Disconnected;
                }
                Err(err.into())
            }
        }
    }

    /// Remove every document, then refresh the list. The caller is expected
    /// to have confirmed the action with the user.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Gateway` when the delete call fails; the local
    /// list is left as-is.
    pub async fn clear_all(&self) -> Result<(), CorpusError> {
        match self.gateway.delete_all_documents().await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                if err.is_transport() {
                    self.state().status = ServerStatus::Disconnected;
                }
                Err(err.into())
            }
        }
    }
}
