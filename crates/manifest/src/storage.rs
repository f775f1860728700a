//! Storage for manifest, application, and response records.

use crate::types::{StoredApplication, StoredManifest, StoredResponse};
use ssi_storage::{RecordStore, Result, ServiceStorage};
use std::sync::Arc;

pub const MANIFEST_NAMESPACE: &str = "manifest";
pub const APPLICATION_NAMESPACE: &str = "application";
pub const RESPONSE_NAMESPACE: &str = "response";

#[derive(Clone)]
pub struct ManifestStorage {
    manifests: RecordStore<StoredManifest>,
    applications: RecordStore<StoredApplication>,
    responses: RecordStore<StoredResponse>,
}

impl ManifestStorage {
    pub fn new(db: Arc<dyn ServiceStorage>) -> Self {
        Self {
            manifests: RecordStore::new(Arc::clone(&db), MANIFEST_NAMESPACE),
            applications: RecordStore::new(Arc::clone(&db), APPLICATION_NAMESPACE),
            responses: RecordStore::new(db, RESPONSE_NAMESPACE),
        }
    }

    pub fn store_manifest(&self, manifest: &StoredManifest) -> Result<()> {
        self.manifests.store(manifest)
    }

    pub fn get_manifest(&self, id: &str) -> Result<StoredManifest> {
        self.manifests.get(id)
    }

    /// All manifests that can be decoded; unreadable entries are skipped.
    pub fn get_manifests(&self) -> Result<Vec<StoredManifest>> {
        self.manifests.get_all()
    }

    pub fn delete_manifest(&self, id: &str) -> Result<()> {
        self.manifests.delete(id)
    }

    pub fn store_application(&self, application: &StoredApplication) -> Result<()> {
        self.applications.store(application)
    }

    pub fn get_application(&self, id: &str) -> Result<StoredApplication> {
        self.applications.get(id)
    }

    /// All applications that can be decoded; unreadable entries are skipped.
    pub fn get_applications(&self) -> Result<Vec<StoredApplication>> {
        self.applications.get_all()
    }

    pub fn delete_application(&self, id: &str) -> Result<()> {
        self.applications.delete(id)
    }

    pub fn store_response(&self, response: &StoredResponse) -> Result<()> {
        self.responses.store(response)
    }

    pub fn get_response(&self, id: &str) -> Result<StoredResponse> {
        self.responses.get(id)
    }

    /// All responses that can be decoded; unreadable entries are skipped.
    pub fn get_responses(&self) -> Result<Vec<StoredResponse>> {
        self.responses.get_all()
    }

    pub fn delete_response(&self, id: &str) -> Result<()> {
        self.responses.delete(id)
    }
}
