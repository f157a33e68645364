use std::sync::Arc;
use crate::domains::member::models::{normalize_nickname, Member, MemberPatch, SocialType};
use crate::shared::database::{as_unique_violation, MemberRepository};
use crate::shared::errors::MemberError;

/// 회원 서비스
/// MemberService: member lookup, creation and partial updates
#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    /// 소셜 정보로 조회, 없으면 생성 (동의 기본값 DISAGREE)
    /// Look up by the social pair, creating the member when absent
    pub async fn get_or_create_by_social(
        &self,
        social_id: &str,
        social_type: SocialType,
    ) -> Result<Member, MemberError> {
        self.members
            .find_or_create_by_social(social_id, social_type)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to find or create member: {:#}", e)))
    }

    /// 소셜 정보로 조회 (생성하지 않음)
    pub async fn find_by_social(
        &self,
        social_id: &str,
        social_type: SocialType,
    ) -> Result<Option<Member>, MemberError> {
        self.members
            .find_by_social(social_id, social_type)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to fetch member: {:#}", e)))
    }

    /// 소셜 정보로 조회, 없으면 MemberNotFound
    /// Look up by the social pair without creating
    pub async fn get_by_social(
        &self,
        social_id: &str,
        social_type: SocialType,
    ) -> Result<Member, MemberError> {
        self.find_by_social(social_id, social_type)
            .await?
            .ok_or_else(|| MemberError::MemberNotFoundBySocial {
                social_id: social_id.to_string(),
                social_type: social_type.to_string(),
            })
    }

    /// 닉네임 사용 가능 여부 확인 (None이면 항상 통과)
    /// Fails with NicknameDuplicate when any member already holds the nickname
    pub async fn verify_nickname_available(&self, nickname: Option<&str>) -> Result<(), MemberError> {
        let Some(nickname) = nickname else {
            return Ok(());
        };

        let exists = self
            .members
            .exists_by_nickname(nickname)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to check nickname: {:#}", e)))?;

        if exists {
            return Err(MemberError::NicknameDuplicate {
                nickname: nickname.to_string(),
            });
        }
        Ok(())
    }

    pub async fn get_member(&self, member_id: u64) -> Result<Member, MemberError> {
        self.members
            .find_by_id(member_id)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to fetch member: {:#}", e)))?
            .ok_or(MemberError::MemberNotFound { id: member_id })
    }

    pub async fn list_members(&self) -> Result<Vec<Member>, MemberError> {
        self.members
            .find_all()
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to list members: {:#}", e)))
    }

    /// 부분 수정
    /// Partial update; a changed nickname is verified first and the
    /// storage constraint backs the check up under concurrent writers
    pub async fn patch_member(&self, member_id: u64, mut patch: MemberPatch) -> Result<Member, MemberError> {
        let mut member = self.get_member(member_id).await?;

        patch.nickname = normalize_nickname(patch.nickname);
        if patch.nickname.is_some() && patch.nickname != member.nickname {
            self.verify_nickname_available(patch.nickname.as_deref()).await?;
        }

        member.apply_patch(patch);
        self.save(&member).await
    }

    /// 회원 저장 (닉네임 유니크 제약 위반은 NicknameDuplicate)
    /// Persist a member; a nickname unique violation becomes NicknameDuplicate
    pub async fn save(&self, member: &Member) -> Result<Member, MemberError> {
        match self.members.update(member).await {
            Ok(saved) => Ok(saved),
            Err(e) if as_unique_violation(&e).is_some() => {
                tracing::warn!(member_id = member.id, "Nickname claimed concurrently");
                Err(MemberError::NicknameDuplicate {
                    nickname: member.nickname.clone().unwrap_or_default(),
                })
            }
            Err(e) => Err(MemberError::DatabaseError(format!("Failed to update member: {:#}", e))),
        }
    }

    /// 회원 삭제 (온보딩 카테고리 / 티켓 연쇄 삭제)
    /// Delete a member, cascading its onboarding categories and tickets
    pub async fn delete_member(&self, member_id: u64) -> Result<(), MemberError> {
        let deleted = self
            .members
            .delete(member_id)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to delete member: {:#}", e)))?;

        if !deleted {
            return Err(MemberError::MemberNotFound { id: member_id });
        }
        tracing::info!(member_id, "Member deleted");
        Ok(())
    }

    pub async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<Member>, MemberError> {
        self.members
            .find_by_refresh_token(refresh_token)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to fetch member by refresh token: {:#}", e)))
    }

    /// Refresh Token 저장 / 삭제 (None)
    /// Store or clear the member's refresh token
    pub async fn update_refresh_token(
        &self,
        member: &Member,
        refresh_token: Option<String>,
    ) -> Result<Member, MemberError> {
        let mut updated = member.clone();
        updated.refresh_token = refresh_token;
        self.save(&updated).await
    }
}
