//! Storage collaborator for submitted documents.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use farmbooks_core::{DocumentId, TenantId};
use farmbooks_ledger::DocumentKind;

use crate::record::DocumentRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document {0} already exists")]
    Duplicate(DocumentId),

    #[error("document store lock poisoned")]
    Poisoned,
}

/// Tenant-isolated records table.
pub trait DocumentStore: Send + Sync {
    /// Insert a new record; an existing id is a `StoreError::Duplicate`.
    fn insert(&self, record: DocumentRecord) -> Result<(), StoreError>;
    fn get(&self, tenant_id: TenantId, id: DocumentId) -> Option<DocumentRecord>;
    /// Records of one tenant, optionally filtered by kind, oldest submission first.
    fn list(&self, tenant_id: TenantId, kind: Option<DocumentKind>) -> Vec<DocumentRecord>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn insert(&self, record: DocumentRecord) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn get(&self, tenant_id: TenantId, id: DocumentId) -> Option<DocumentRecord> {
        (**self).get(tenant_id, id)
    }

    fn list(&self, tenant_id: TenantId, kind: Option<DocumentKind>) -> Vec<DocumentRecord> {
        (**self).list(tenant_id, kind)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<(TenantId, DocumentId), DocumentRecord>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert(&self, record: DocumentRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let key = (record.tenant_id, record.id);
        if map.contains_key(&key) {
            return Err(StoreError::Duplicate(record.id));
        }
        map.insert(key, record);
        Ok(())
    }

    fn get(&self, tenant_id: TenantId, id: DocumentId) -> Option<DocumentRecord> {
        let map = self.inner.read().ok()?;
        map.get(&(tenant_id, id)).cloned()
    }

    fn list(&self, tenant_id: TenantId, kind: Option<DocumentKind>) -> Vec<DocumentRecord> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut records: Vec<DocumentRecord> = map
            .iter()
            .filter(|((t, _), r)| *t == tenant_id && kind.is_none_or(|k| r.kind() == k))
            .map(|(_, r)| r.clone())
            .collect();
        records.sort_by_key(|r| (r.submitted_at, *r.id.as_uuid()));
        records
    }
}
