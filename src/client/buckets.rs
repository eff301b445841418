//! # Bucket Operations
//!
//! Cloud Storage bucket delegations addressed by [`Categorizer`]. Creation and
//! enumeration are scoped to the client's configured project; listings follow
//! pagination tokens to exhaustion before returning.

use google_cloud_storage::http::buckets::delete::DeleteBucketRequest;
use google_cloud_storage::http::buckets::get::GetBucketRequest;
use google_cloud_storage::http::buckets::insert::{InsertBucketParam, InsertBucketRequest};
use google_cloud_storage::http::buckets::list::ListBucketsRequest;
use google_cloud_storage::http::buckets::patch::{BucketPatchConfig, PatchBucketRequest};
use google_cloud_storage::http::buckets::Bucket;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use google_cloud_storage::http::objects::Object;
use tracing::debug;

use crate::error::ClientResult;
use crate::keys::Categorizer;

use super::FireblobClient;

impl FireblobClient {
    /// Fetch the attributes of a bucket
    pub async fn bucket_attrs(&self, cat: &impl Categorizer) -> ClientResult<Bucket> {
        let bucket = self
            .blob()
            .get_bucket(&GetBucketRequest {
                bucket: cat.category().to_string(),
                ..Default::default()
            })
            .await?;
        Ok(bucket)
    }

    /// Create a bucket in the configured project
    pub async fn create_bucket(&self, cat: &impl Categorizer) -> ClientResult<Bucket> {
        debug!(
            category = %cat.category(),
            project_id = %self.project_id(),
            "Creating bucket"
        );

        let created = self
            .blob()
            .insert_bucket(&InsertBucketRequest {
                name: cat.category().to_string(),
                param: InsertBucketParam {
                    project: self.project_id().to_string(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await?;
        Ok(created)
    }

    /// Delete a bucket
    pub async fn delete_bucket(&self, cat: &impl Categorizer) -> ClientResult<()> {
        debug!(category = %cat.category(), "Deleting bucket");

        self.blob()
            .delete_bucket(&DeleteBucketRequest {
                bucket: cat.category().to_string(),
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    /// Patch the bucket's attributes; the SDK patch config passes through verbatim
    pub async fn update_bucket(
        &self,
        cat: &impl Categorizer,
        patch: BucketPatchConfig,
    ) -> ClientResult<Bucket> {
        debug!(category = %cat.category(), "Updating bucket");

        let updated = self
            .blob()
            .patch_bucket(&PatchBucketRequest {
                bucket: cat.category().to_string(),
                metadata: Some(patch),
                ..Default::default()
            })
            .await?;
        Ok(updated)
    }

    /// List every object in a bucket, following pagination to exhaustion
    pub async fn list_objects(&self, cat: &impl Categorizer) -> ClientResult<Vec<Object>> {
        let mut objects = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .blob()
                .list_objects(&ListObjectsRequest {
                    bucket: cat.category().to_string(),
                    page_token: page_token.clone(),
                    ..Default::default()
                })
                .await?;

            if let Some(items) = page.items {
                objects.extend(items);
            }
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(
            category = %cat.category(),
            count = objects.len(),
            "Listed objects"
        );
        Ok(objects)
    }

    /// List every bucket of the configured project
    pub async fn list_buckets(&self) -> ClientResult<Vec<Bucket>> {
        let mut buckets = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .blob()
                .list_buckets(&ListBucketsRequest {
                    project: self.project_id().to_string(),
                    page_token: page_token.clone(),
                    ..Default::default()
                })
                .await?;

            buckets.extend(page.items);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(
            project_id = %self.project_id(),
            count = buckets.len(),
            "Listed buckets"
        );
        Ok(buckets)
    }
}
