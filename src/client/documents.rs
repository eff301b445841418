//! # Document Operations
//!
//! Firestore delegations addressed by [`Grouping`]: collection from the
//! category, document from the identifier. Results and errors come straight
//! from the `firestore` crate; a missing document reads as `Ok(None)`.

use std::collections::HashMap;

use firestore::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientResult;
use crate::keys::Grouping;

use super::FireblobClient;

/// Full Firestore document path for a grouping, without touching the service
pub fn document_path(project_id: &str, group: &impl Grouping) -> String {
    format!(
        "projects/{}/databases/(default)/documents/{}/{}",
        project_id,
        group.category(),
        group.identifier()
    )
}

/// Field paths covered by a merge write: exactly the keys of the payload
fn merge_field_paths(data: &HashMap<String, Value>) -> Vec<String> {
    let mut paths: Vec<String> = data.keys().cloned().collect();
    paths.sort();
    paths
}

impl FireblobClient {
    /// Fetch the raw document snapshot for a grouping
    pub async fn doc_snapshot(
        &self,
        group: &impl Grouping,
    ) -> ClientResult<Option<FirestoreDocument>> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            "Fetching document snapshot"
        );

        let snapshot = self
            .store()
            .fluent()
            .select()
            .by_id_in(group.category())
            .one(group.identifier())
            .await?;
        Ok(snapshot)
    }

    /// Full document path a grouping resolves to; pure, no I/O
    pub fn doc_path(&self, group: &impl Grouping) -> String {
        document_path(self.project_id(), group)
    }

    /// Fetch a document and decode it into a caller-owned type
    pub async fn doc_to<T>(&self, group: &impl Grouping) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let decoded = self
            .store()
            .fluent()
            .select()
            .by_id_in(group.category())
            .obj::<T>()
            .one(group.identifier())
            .await?;
        Ok(decoded)
    }

    /// Fetch the full field map of a document
    pub async fn doc_data(
        &self,
        group: &impl Grouping,
    ) -> ClientResult<Option<HashMap<String, Value>>> {
        self.doc_to::<HashMap<String, Value>>(group).await
    }

    /// Fetch a single top-level field of a document
    pub async fn doc_field(
        &self,
        group: &impl Grouping,
        field: &str,
    ) -> ClientResult<Option<Value>> {
        let data = self.doc_data(group).await?;
        Ok(data.and_then(|mut fields| fields.remove(field)))
    }

    /// Merge-write exactly one string field of a document
    pub async fn update_doc_field(
        &self,
        group: &impl Grouping,
        field: &str,
        value: &str,
    ) -> ClientResult<()> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            field = %field,
            "Updating document field"
        );

        let mut data = HashMap::new();
        data.insert(field.to_string(), Value::String(value.to_string()));

        let _written: HashMap<String, Value> = self
            .store()
            .fluent()
            .update()
            .fields([field.to_string()])
            .in_col(group.category())
            .document_id(group.identifier())
            .object(&data)
            .execute()
            .await?;
        Ok(())
    }

    /// Create a document; fails if it already exists
    pub async fn create_doc(
        &self,
        group: &impl Grouping,
        data: &HashMap<String, Value>,
    ) -> ClientResult<()> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            fields = data.len(),
            "Creating document"
        );

        let _written: HashMap<String, Value> = self
            .store()
            .fluent()
            .insert()
            .into(group.category())
            .document_id(group.identifier())
            .object(data)
            .execute()
            .await?;
        Ok(())
    }

    /// Delete a document
    pub async fn delete_doc(&self, group: &impl Grouping) -> ClientResult<()> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            "Deleting document"
        );

        self.store()
            .fluent()
            .delete()
            .from(group.category())
            .document_id(group.identifier())
            .execute()
            .await?;
        Ok(())
    }

    /// Set the document's data, merging or overwriting
    ///
    /// With `merge` the write carries a field mask covering exactly the keys
    /// of `data`, leaving other fields of an existing document intact. Without
    /// it the document is replaced wholesale.
    pub async fn set_doc_data(
        &self,
        group: &impl Grouping,
        data: &HashMap<String, Value>,
        merge: bool,
    ) -> ClientResult<()> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            fields = data.len(),
            merge = merge,
            "Setting document data"
        );

        let _written: HashMap<String, Value> = if merge {
            self.store()
                .fluent()
                .update()
                .fields(merge_field_paths(data))
                .in_col(group.category())
                .document_id(group.identifier())
                .object(data)
                .execute()
                .await?
        } else {
            self.store()
                .fluent()
                .update()
                .in_col(group.category())
                .document_id(group.identifier())
                .object(data)
                .execute()
                .await?
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Key;

    #[test]
    fn test_document_path_derivation() {
        let key = Key::new("invoices", "2024-0042");
        assert_eq!(
            document_path("demo-project", &key),
            "projects/demo-project/databases/(default)/documents/invoices/2024-0042"
        );
    }

    #[test]
    fn test_document_path_is_pure() {
        let key = Key::new("users", "alice");
        assert_eq!(
            document_path("p", &key),
            document_path("p", &key.clone())
        );
    }

    #[test]
    fn test_merge_covers_exactly_the_payload_keys() {
        let mut data = HashMap::new();
        data.insert("status".to_string(), Value::String("paid".to_string()));
        data.insert("total".to_string(), Value::from(42));

        assert_eq!(merge_field_paths(&data), vec!["status", "total"]);
    }

    #[test]
    fn test_overwrite_and_merge_shape_different_writes() {
        // merge=true masks the payload keys; merge=false sends no mask at all,
        // which is what makes the two produce different resulting documents
        // when partial data lands on an existing one.
        let mut partial = HashMap::new();
        partial.insert("status".to_string(), Value::String("paid".to_string()));

        let mask = merge_field_paths(&partial);
        assert_eq!(mask, vec!["status"]);
        assert!(!mask.contains(&"total".to_string()));
    }

    #[test]
    fn test_merge_field_paths_empty_payload() {
        let data = HashMap::new();
        assert!(merge_field_paths(&data).is_empty());
    }
}
