use axum::extract::multipart::{Field, Multipart};
use crate::shared::errors::AuthError;
use crate::shared::services::UploadFile;

/// multipart 요청에서 읽은 파트들
/// Parts collected from a multipart body, keyed by field name
#[derive(Debug, Default)]
pub struct MultipartParts {
    pub texts: Vec<(String, String)>,
    pub files: Vec<(String, UploadFile)>,
}

impl MultipartParts {
    /// 모든 파트를 읽음 (파일명이 있는 파트는 파일, 나머지는 텍스트)
    /// Drain the body; parts carrying a file name are files, everything else is text
    pub async fn read(mut multipart: Multipart) -> Result<Self, AuthError> {
        let mut parts = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AuthError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if field.file_name().is_some() {
                let file = read_file(field).await?;
                parts.files.push((name, file));
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AuthError::InvalidRequest(format!("Unreadable part {}: {}", name, e)))?;
                parts.texts.push((name, text));
            }
        }

        Ok(parts)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn texts<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.texts
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// 이름으로 값 파트를 모두 읽음 (텍스트 파트 + 파일명이 붙은 Blob 파트)
    /// Value parts by name, including JSON sent as a `Blob` (which carries a file name)
    pub fn values(&self, name: &str) -> Result<Vec<String>, AuthError> {
        let mut values: Vec<String> = self.texts(name).map(str::to_string).collect();
        for (_, file) in self.files.iter().filter(|(n, _)| n == name) {
            let text = std::str::from_utf8(&file.bytes)
                .map_err(|_| AuthError::InvalidRequest(format!("Part {} is not UTF-8 text", name)))?;
            values.push(text.to_string());
        }
        Ok(values)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        let index = self.files.iter().position(|(n, _)| n == name)?;
        Some(self.files.remove(index).1)
    }
}

async fn read_file(field: Field<'_>) -> Result<UploadFile, AuthError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AuthError::InvalidRequest(format!("Unreadable file part: {}", e)))?;

    Ok(UploadFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}
