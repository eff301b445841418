//! # Object Operations
//!
//! Cloud Storage delegations addressed by [`Grouping`]: bucket from the
//! category, object from the identifier. Reads and writes come in whole-buffer
//! and streaming forms; the copy between two groupings is a streamed download
//! feeding a streamed upload, byte for byte.

use std::collections::HashMap;

use bytes::Bytes;
use futures::{pin_mut, Stream, TryStreamExt};
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::patch::PatchObjectRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use google_cloud_storage::http::objects::Object;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::keys::{Grouping, MetaGrouping};

use super::FireblobClient;

/// Bucket/object address a grouping resolves to
///
/// Pure value; nothing happens against the service until an operation is
/// invoked with the same grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub object: String,
}

impl ObjectLocation {
    /// Derive the location for a grouping
    pub fn of(group: &impl Grouping) -> Self {
        Self {
            bucket: group.category().to_string(),
            object: group.identifier().to_string(),
        }
    }

    /// Bucket holding the object
    pub fn bucket_name(&self) -> &str {
        &self.bucket
    }

    /// `gs://bucket/object` rendering
    pub fn uri(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.object)
    }
}

/// Drain a chunked byte stream into a writer, returning the bytes copied
async fn drain_stream_into<S, E, W>(stream: S, dst: &mut W) -> ClientResult<u64>
where
    S: Stream<Item = Result<Bytes, E>>,
    ClientError: From<E>,
    W: AsyncWrite + Unpin,
{
    pin_mut!(stream);

    let mut copied = 0u64;
    while let Some(chunk) = stream.try_next().await? {
        copied += chunk.len() as u64;
        dst.write_all(&chunk).await?;
    }
    dst.flush().await?;
    Ok(copied)
}

impl FireblobClient {
    /// Address an object without touching the service; pure, no I/O
    pub fn object_location(&self, group: &impl Grouping) -> ObjectLocation {
        ObjectLocation::of(group)
    }

    /// Fetch the full attributes of an object
    pub async fn object_attrs(&self, group: &impl Grouping) -> ClientResult<Object> {
        let attrs = self
            .blob()
            .get_object(&GetObjectRequest {
                bucket: group.category().to_string(),
                object: group.identifier().to_string(),
                ..Default::default()
            })
            .await?;
        Ok(attrs)
    }

    /// Fetch the user metadata map of an object; empty when unset
    pub async fn object_metadata(
        &self,
        group: &impl Grouping,
    ) -> ClientResult<HashMap<String, String>> {
        let attrs = self.object_attrs(group).await?;
        Ok(attrs.metadata.unwrap_or_default())
    }

    /// Patch the object's user metadata to the key's map
    pub async fn update_object_metadata(
        &self,
        metagroup: &impl MetaGrouping,
    ) -> ClientResult<Object> {
        debug!(
            category = %metagroup.category(),
            identifier = %metagroup.identifier(),
            "Updating object metadata"
        );

        let updated = self
            .blob()
            .patch_object(&PatchObjectRequest {
                bucket: metagroup.category().to_string(),
                object: metagroup.identifier().to_string(),
                metadata: Some(Object {
                    metadata: Some(metagroup.meta()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .await?;
        Ok(updated)
    }

    /// Download the whole object into memory
    pub async fn read_object(&self, group: &impl Grouping) -> ClientResult<Vec<u8>> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            "Reading object"
        );

        let data = self
            .blob()
            .download_object(
                &GetObjectRequest {
                    bucket: group.category().to_string(),
                    object: group.identifier().to_string(),
                    ..Default::default()
                },
                &Range::default(),
            )
            .await?;
        Ok(data)
    }

    /// Upload a whole in-memory buffer as the object
    pub async fn write_object(
        &self,
        group: &impl Grouping,
        data: Vec<u8>,
    ) -> ClientResult<Object> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            bytes = data.len(),
            "Writing object"
        );

        let uploaded = self
            .blob()
            .upload_object(
                &UploadObjectRequest {
                    bucket: group.category().to_string(),
                    ..Default::default()
                },
                data,
                &UploadType::Simple(Media::new(group.identifier().to_string())),
            )
            .await?;
        Ok(uploaded)
    }

    /// Open a streaming download of the object
    pub async fn object_reader(
        &self,
        group: &impl Grouping,
    ) -> ClientResult<impl Stream<Item = Result<Bytes, google_cloud_storage::http::Error>>> {
        let stream = self
            .blob()
            .download_streamed_object(
                &GetObjectRequest {
                    bucket: group.category().to_string(),
                    object: group.identifier().to_string(),
                    ..Default::default()
                },
                &Range::default(),
            )
            .await?;
        Ok(stream)
    }

    /// Stream the object into a writer, returning the bytes copied
    pub async fn copy_object_to<W>(
        &self,
        group: &impl Grouping,
        dst: &mut W,
    ) -> ClientResult<u64>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let stream = self.object_reader(group).await?;
        let copied = drain_stream_into(stream, dst).await?;

        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            bytes = copied,
            "Copied object to writer"
        );
        Ok(copied)
    }

    /// Stream a reader into the object
    pub async fn write_object_from<R>(
        &self,
        group: &impl Grouping,
        src: R,
    ) -> ClientResult<Object>
    where
        R: AsyncRead + Send + Sync + Unpin + 'static,
    {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            "Writing object from reader"
        );

        let uploaded = self
            .blob()
            .upload_streamed_object(
                &UploadObjectRequest {
                    bucket: group.category().to_string(),
                    ..Default::default()
                },
                ReaderStream::new(src),
                &UploadType::Simple(Media::new(group.identifier().to_string())),
            )
            .await?;
        Ok(uploaded)
    }

    /// Copy one object to another location
    ///
    /// Reads the source's full byte stream and writes an identical stream to
    /// the destination; no server-side rewrite is involved.
    pub async fn copy_object(
        &self,
        from: &(impl Grouping + 'static),
        to: &impl Grouping,
    ) -> ClientResult<Object> {
        debug!(
            from = %ObjectLocation::of(from).uri(),
            to = %ObjectLocation::of(to).uri(),
            "Copying object"
        );

        let source = self.object_reader(from).await?;
        let uploaded = self
            .blob()
            .upload_streamed_object(
                &UploadObjectRequest {
                    bucket: to.category().to_string(),
                    ..Default::default()
                },
                source,
                &UploadType::Simple(Media::new(to.identifier().to_string())),
            )
            .await?;
        Ok(uploaded)
    }

    /// Delete an object
    pub async fn delete_object(&self, group: &impl Grouping) -> ClientResult<()> {
        debug!(
            category = %group.category(),
            identifier = %group.identifier(),
            "Deleting object"
        );

        self.blob()
            .delete_object(&DeleteObjectRequest {
                bucket: group.category().to_string(),
                object: group.identifier().to_string(),
                ..Default::default()
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Key;

    #[test]
    fn test_object_location_derivation() {
        let key = Key::new("media", "covers/alpha.png");
        let location = ObjectLocation::of(&key);
        assert_eq!(location.bucket_name(), "media");
        assert_eq!(location.object, "covers/alpha.png");
    }

    #[test]
    fn test_object_location_uri() {
        let location = ObjectLocation::of(&Key::new("media", "covers/alpha.png"));
        assert_eq!(location.uri(), "gs://media/covers/alpha.png");
    }

    #[test]
    fn test_object_location_is_pure() {
        let key = Key::new("media", "a");
        assert_eq!(ObjectLocation::of(&key), ObjectLocation::of(&key));
    }

    #[tokio::test]
    async fn test_drain_preserves_bytes_and_count() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"hello ")),
            Ok(Bytes::from_static(b"world")),
        ];

        let mut dst = Vec::new();
        let copied = drain_stream_into(futures::stream::iter(chunks), &mut dst)
            .await
            .unwrap();

        assert_eq!(copied, 11);
        assert_eq!(dst, b"hello world");
    }

    #[tokio::test]
    async fn test_drain_empty_stream_writes_nothing() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![];

        let mut dst = Vec::new();
        let copied = drain_stream_into(futures::stream::iter(chunks), &mut dst)
            .await
            .unwrap();

        assert_eq!(copied, 0);
        assert!(dst.is_empty());
    }

    #[tokio::test]
    async fn test_drain_surfaces_stream_errors() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )),
        ];

        let mut dst = Vec::new();
        let result = drain_stream_into(futures::stream::iter(chunks), &mut dst).await;

        assert!(matches!(result, Err(ClientError::Io(_))));
        // the chunks before the failure still reached the writer
        assert_eq!(dst, b"partial");
    }
}
