use std::collections::HashMap;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use parking_lot::Mutex;
use url::Url;

/// 오브젝트 스토리지 인터페이스 (S3 put + 공개 URL)
/// Object storage interface: put an object, then resolve its public URL
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;

    fn object_url(&self, key: &str) -> Result<String>;
}

/// 공개 URL 기준 주소 정규화 (끝에 '/' 보장)
fn parse_base_url(base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&normalized).with_context(|| format!("Invalid public base URL: {}", base_url))
}

/// AWS S3 구현
/// AWS S3 backed storage
pub struct S3ObjectStorage {
    client: S3Client,
    bucket: String,
    public_base_url: Url,
}

impl S3ObjectStorage {
    /// public_base_url이 없으면 버킷의 virtual-hosted URL 사용
    pub fn new(client: S3Client, bucket: String, public_base_url: Option<&str>) -> Result<Self> {
        let public_base_url = match public_base_url {
            Some(base) => parse_base_url(base)?,
            None => parse_base_url(&format!("https://{}.s3.amazonaws.com", bucket))?,
        };
        Ok(Self {
            client,
            bucket,
            public_base_url,
        })
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        let content_length = body.len() as i64;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .content_length(content_length)
            .send()
            .await
            .with_context(|| format!("Failed to upload s3://{}/{}", self.bucket, key))?;

        tracing::info!(bucket = %self.bucket, key = %key, size = content_length, "Object uploaded to S3");
        Ok(())
    }

    fn object_url(&self, key: &str) -> Result<String> {
        Ok(self
            .public_base_url
            .join(key)
            .with_context(|| format!("Invalid object key: {}", key))?
            .to_string())
    }
}

/// 업로드된 오브젝트 (메모리 구현)
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// 메모리 구현 (테스트 / 로컬 개발용)
/// In-memory storage for tests and local development
pub struct InMemoryObjectStorage {
    public_base_url: Url,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStorage {
    pub fn new(public_base_url: &str) -> Result<Self> {
        Ok(Self {
            public_base_url: parse_base_url(public_base_url)?,
            objects: Mutex::new(HashMap::new()),
        })
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.objects.lock().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn object_url(&self, key: &str) -> Result<String> {
        Ok(self
            .public_base_url
            .join(key)
            .with_context(|| format!("Invalid object key: {}", key))?
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_put_and_url() {
        let storage = InMemoryObjectStorage::new("https://cdn.example.com/bucket").unwrap();
        storage
            .put_object("Member/profileUrl/a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        let stored = storage.get("Member/profileUrl/a.png").unwrap();
        assert_eq!(stored.body, vec![1, 2, 3]);
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(
            storage.object_url("Member/profileUrl/a.png").unwrap(),
            "https://cdn.example.com/bucket/Member/profileUrl/a.png"
        );
    }
}
