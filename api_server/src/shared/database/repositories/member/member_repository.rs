use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use crate::domains::member::models::{Agree, Member, SocialType};
use crate::shared::database::map_sqlx_error;

/// 회원 저장소 인터페이스
/// Member persistence interface
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<Member>>;

    async fn find_by_social(&self, social_id: &str, social_type: SocialType) -> Result<Option<Member>>;

    /// (social_id, social_type)로 조회, 없으면 동의 항목 DISAGREE로 생성
    /// Look up by the unique social pair, creating it (consents DISAGREE) when absent.
    /// 동시 로그인에도 회원은 한 명만 생성되어야 함
    async fn find_or_create_by_social(&self, social_id: &str, social_type: SocialType) -> Result<Member>;

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool>;

    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<Member>>;

    async fn find_all(&self) -> Result<Vec<Member>>;

    /// 변경 가능한 필드 저장 (nickname, profile_url, 동의 항목, refresh_token)
    /// Persist the mutable fields; a nickname collision surfaces as `UniqueViolation`
    async fn update(&self, member: &Member) -> Result<Member>;

    /// 삭제 (온보딩 카테고리도 함께 삭제). 삭제되었으면 true
    async fn delete(&self, id: u64) -> Result<bool>;
}

const MEMBER_COLUMNS: &str = "id, social_id, social_type, nickname, profile_url, marketing_agree, \
                              push_agree, refresh_token, created_at, updated_at";

/// PostgreSQL 회원 저장소
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_member(row: &PgRow) -> Result<Member> {
        let social_type: String = row.get("social_type");
        let marketing_agree: String = row.get("marketing_agree");
        let push_agree: String = row.get("push_agree");

        Ok(Member {
            id: row.get::<i64, _>("id") as u64,
            social_id: row.get("social_id"),
            social_type: social_type.parse::<SocialType>().map_err(|e| anyhow!(e))?,
            nickname: row.get("nickname"),
            profile_url: row.get("profile_url"),
            marketing_agree: marketing_agree.parse::<Agree>().map_err(|e| anyhow!(e))?,
            push_agree: push_agree.parse::<Agree>().map_err(|e| anyhow!(e))?,
            refresh_token: row.get("refresh_token"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<Member>> {
        let row = sqlx::query(&format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS))
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch member by id")?;

        row.as_ref().map(Self::row_to_member).transpose()
    }

    async fn find_by_social(&self, social_id: &str, social_type: SocialType) -> Result<Option<Member>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM members WHERE social_id = $1 AND social_type = $2",
            MEMBER_COLUMNS
        ))
        .bind(social_id)
        .bind(social_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch member by social")?;

        row.as_ref().map(Self::row_to_member).transpose()
    }

    async fn find_or_create_by_social(&self, social_id: &str, social_type: SocialType) -> Result<Member> {
        if let Some(member) = self.find_by_social(social_id, social_type).await? {
            return Ok(member);
        }

        // 동시 생성 경쟁은 유니크 제약 + ON CONFLICT로 흡수
        sqlx::query(
            r#"
            INSERT INTO members (social_id, social_type, marketing_agree, push_agree, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (social_id, social_type) DO NOTHING
            "#,
        )
        .bind(social_id)
        .bind(social_type.as_str())
        .bind(Agree::Disagree.as_str())
        .bind(Agree::Disagree.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to create member")?;

        self.find_by_social(social_id, social_type)
            .await?
            .ok_or_else(|| anyhow!("Member vanished after creation: {}/{}", social_id, social_type))
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM members WHERE nickname = $1) AS taken")
            .bind(nickname)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check nickname")?;

        Ok(row.get("taken"))
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<Member>> {
        let row = sqlx::query(&format!("SELECT {} FROM members WHERE refresh_token = $1", MEMBER_COLUMNS))
            .bind(refresh_token)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch member by refresh token")?;

        row.as_ref().map(Self::row_to_member).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query(&format!("SELECT {} FROM members ORDER BY id", MEMBER_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch members")?;

        rows.iter().map(Self::row_to_member).collect()
    }

    async fn update(&self, member: &Member) -> Result<Member> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE members
            SET nickname = $2, profile_url = $3, marketing_agree = $4, push_agree = $5,
                refresh_token = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            MEMBER_COLUMNS
        ))
        .bind(member.id as i64)
        .bind(&member.nickname)
        .bind(&member.profile_url)
        .bind(member.marketing_agree.as_str())
        .bind(member.push_agree.as_str())
        .bind(&member.refresh_token)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .context("Failed to update member")?;

        Self::row_to_member(&row)
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        // onboarding_member_categories는 ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .context("Failed to delete member")?;

        Ok(result.rows_affected() > 0)
    }
}
