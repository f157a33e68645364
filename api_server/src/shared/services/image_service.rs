use std::io::Cursor;
use std::sync::Arc;
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use uuid::Uuid;
use crate::shared::clients::ObjectStorage;
use crate::shared::errors::ImageError;

/// 카테고리 아이콘 높이 (px)
/// Target height for category icons
pub const CATEGORY_IMAGE_HEIGHT: u32 = 122;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// 업로드된 파일 (multipart part)
/// Uploaded file as received from a multipart part
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

// =====================================================
// 이미지 서비스
// =====================================================
// 저장 키: {entity}/{column}/{uuid}.{ext}
// - store:         그대로 업로드
// - store_resized: 높이가 target보다 클 때만 비율 유지 축소 후
//                  원본 포맷으로 다시 인코딩해서 업로드
// 실패는 모두 ImageError (재시도 없음)
// =====================================================
#[derive(Clone)]
pub struct ImageService {
    storage: Arc<dyn ObjectStorage>,
}

impl ImageService {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// 원본 그대로 업로드 후 공개 URL 반환
    /// Upload the blob unchanged and return its public URL
    pub async fn store(
        &self,
        file: Option<&UploadFile>,
        entity_name: &str,
        column_name: &str,
    ) -> Result<String, ImageError> {
        let file = Self::require_file(file)?;
        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let key = Self::storage_key(entity_name, column_name, file);
        self.upload(&key, file.bytes.clone(), &content_type).await
    }

    /// 리사이즈 후 업로드 (업스케일 없음)
    /// Resize (never upscale) to `target_height`, re-encode in the source format, then upload
    pub async fn store_resized(
        &self,
        file: Option<&UploadFile>,
        entity_name: &str,
        column_name: &str,
        target_height: u32,
    ) -> Result<String, ImageError> {
        let file = Self::require_file(file)?;

        let format = file
            .content_type
            .as_deref()
            .and_then(ImageFormat::from_mime_type)
            .or_else(|| image::guess_format(&file.bytes).ok())
            .ok_or_else(|| ImageError::Decode("unknown image format".to_string()))?;

        let source = image::load_from_memory_with_format(&file.bytes, format)
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        let resized = Self::resize_to_height(source, target_height);
        let body = Self::encode(&resized, format)?;

        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| format.to_mime_type().to_string());
        let key = Self::storage_key(entity_name, column_name, file);
        self.upload(&key, body, &content_type).await
    }

    /// 높이가 target_height보다 클 때만 비율을 유지하며 축소
    /// Scale down preserving aspect ratio; images at or below the target are returned untouched
    pub fn resize_to_height(image: DynamicImage, target_height: u32) -> DynamicImage {
        if image.height() <= target_height {
            return image;
        }
        let ratio = image.width() as f64 / image.height() as f64;
        let new_width = ((target_height as f64 * ratio) as u32).max(1);
        image.resize_exact(new_width, target_height, FilterType::Triangle)
    }

    /// UUID + 원본 확장자
    /// Random file name keeping the declared extension (lowercased); no extension when none is declared
    pub fn uuid_file_name(file: &UploadFile) -> String {
        let extension = file
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty());

        match extension {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        }
    }

    fn storage_key(entity_name: &str, column_name: &str, file: &UploadFile) -> String {
        format!("{}/{}/{}", entity_name, column_name, Self::uuid_file_name(file))
    }

    fn require_file(file: Option<&UploadFile>) -> Result<&UploadFile, ImageError> {
        let file = file.ok_or(ImageError::MissingFile)?;
        if file.bytes.is_empty() {
            return Err(ImageError::EmptyFile);
        }
        Ok(file)
    }

    fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ImageError> {
        // JPEG은 알파 채널을 지원하지 않음
        let image = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => image.clone(),
        };

        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        Ok(buffer)
    }

    async fn upload(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<String, ImageError> {
        self.storage
            .put_object(key, body, content_type)
            .await
            .map_err(|e| ImageError::Storage(format!("{:#}", e)))?;

        self.storage
            .object_url(key)
            .map_err(|e| ImageError::Storage(format!("{:#}", e)))
    }
}
