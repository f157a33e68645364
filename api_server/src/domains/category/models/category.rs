use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 카테고리 (이름이 조회 키)
/// Category, looked up by its unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    #[schema(example = "sports")]
    pub name: String,
    #[schema(example = "Sports")]
    pub eng_name: String,
    pub basic_image: Option<String>,
    pub click_image: Option<String>,
}

/// 카테고리 아이콘 종류 (기본 / 클릭)
/// Which category icon an upload replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryImageKind {
    Basic,
    Click,
}

impl CategoryImageKind {
    /// S3 키 경로에 쓰이는 컬럼명
    /// Column name used in the storage key
    pub fn column_name(&self) -> &'static str {
        match self {
            CategoryImageKind::Basic => "basicImage",
            CategoryImageKind::Click => "clickImage",
        }
    }
}

/// 카테고리 이름 정규화: 앞뒤 공백만 제거 (대소문자 구분)
/// Names are trimmed and then matched exactly (case-sensitive)
pub fn normalize_category_name(name: &str) -> &str {
    name.trim()
}

/// 중복 제거 (처음 등장 순서 유지, 빈 이름 제외)
/// De-duplicate names keeping first-occurrence order, dropping blanks
pub fn distinct_category_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for name in names {
        let name = normalize_category_name(name.as_ref());
        if !name.is_empty() && !result.iter().any(|n| n == name) {
            result.push(name.to_string());
        }
    }
    result
}
