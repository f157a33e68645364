use std::collections::{BTreeMap, HashMap};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use parking_lot::Mutex;
use crate::domains::category::models::{Category, CategoryImageKind};
use crate::domains::member::models::{Agree, Member, SocialType};
use crate::domains::ticket::models::{
    MonthlyStatistic, Ticket, TicketFilter, YearlyStatistic, sort_tickets,
};
use crate::shared::database::UniqueViolation;
use super::{CategoryRepository, MemberRepository, OnboardingRepository, TicketRepository};

/// 메모리 저장소 (테스트 / 로컬 실행용)
/// In-memory store implementing every repository trait
///
/// 하나의 Mutex 안에서 모든 연산이 수행되므로 각 연산은 원자적입니다.
/// (PostgreSQL 구현의 유니크 제약 / 트랜잭션과 같은 관찰 결과)
pub struct MockStore {
    inner: Mutex<MockData>,
}

#[derive(Default)]
struct MockData {
    members: BTreeMap<u64, Member>,
    categories: BTreeMap<u64, Category>,
    /// member_id -> 선택 순서대로의 category_id
    onboarding: HashMap<u64, Vec<u64>>,
    tickets: BTreeMap<u64, Ticket>,
    next_member_id: u64,
    next_category_id: u64,
    next_ticket_id: u64,
}

/// 테스트용 티켓 생성 입력
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub member_id: Option<u64>,
    pub category_name: String,
    pub title: String,
    pub content: String,
    pub ticket_date: DateTime<Utc>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockData::default()),
        }
    }

    /// 카테고리 추가 (이름 중복이면 기존 카테고리 반환)
    pub fn insert_category(&self, name: &str, eng_name: &str) -> Category {
        let mut data = self.inner.lock();
        if let Some(existing) = data.categories.values().find(|c| c.name == name) {
            return existing.clone();
        }
        data.next_category_id += 1;
        let category = Category {
            id: data.next_category_id,
            name: name.to_string(),
            eng_name: eng_name.to_string(),
            basic_image: None,
            click_image: None,
        };
        data.categories.insert(category.id, category.clone());
        category
    }

    /// 티켓 추가 (카테고리 이름이 없으면 에러)
    pub fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket> {
        let mut data = self.inner.lock();
        let category_id = data
            .categories
            .values()
            .find(|c| c.name == ticket.category_name)
            .map(|c| c.id)
            .ok_or_else(|| anyhow!("Unknown category: {}", ticket.category_name))?;

        data.next_ticket_id += 1;
        let ticket = Ticket {
            id: data.next_ticket_id,
            member_id: ticket.member_id,
            category_id,
            category_name: ticket.category_name,
            title: ticket.title,
            content: ticket.content,
            location: None,
            image_url: None,
            ticket_date: ticket.ticket_date,
            created_at: Utc::now(),
        };
        data.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    pub fn member_count(&self) -> usize {
        self.inner.lock().members.len()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberRepository for MockStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<Member>> {
        Ok(self.inner.lock().members.get(&id).cloned())
    }

    async fn find_by_social(&self, social_id: &str, social_type: SocialType) -> Result<Option<Member>> {
        Ok(self
            .inner
            .lock()
            .members
            .values()
            .find(|m| m.social_id == social_id && m.social_type == social_type)
            .cloned())
    }

    async fn find_or_create_by_social(&self, social_id: &str, social_type: SocialType) -> Result<Member> {
        let mut data = self.inner.lock();
        if let Some(member) = data
            .members
            .values()
            .find(|m| m.social_id == social_id && m.social_type == social_type)
        {
            return Ok(member.clone());
        }

        data.next_member_id += 1;
        let now = Utc::now();
        let member = Member {
            id: data.next_member_id,
            social_id: social_id.to_string(),
            social_type,
            nickname: None,
            profile_url: None,
            marketing_agree: Agree::Disagree,
            push_agree: Agree::Disagree,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        data.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool> {
        Ok(self
            .inner
            .lock()
            .members
            .values()
            .any(|m| m.nickname.as_deref() == Some(nickname)))
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<Member>> {
        Ok(self
            .inner
            .lock()
            .members
            .values()
            .find(|m| m.refresh_token.as_deref() == Some(refresh_token))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Member>> {
        Ok(self.inner.lock().members.values().cloned().collect())
    }

    async fn update(&self, member: &Member) -> Result<Member> {
        let mut data = self.inner.lock();
        if let Some(nickname) = &member.nickname {
            let taken = data
                .members
                .values()
                .any(|m| m.id != member.id && m.nickname.as_ref() == Some(nickname));
            if taken {
                return Err(anyhow::Error::new(UniqueViolation {
                    constraint: "uq_members_nickname".to_string(),
                }));
            }
        }

        let stored = data
            .members
            .get_mut(&member.id)
            .ok_or_else(|| anyhow!("Member not found: id={}", member.id))?;
        stored.nickname = member.nickname.clone();
        stored.profile_url = member.profile_url.clone();
        stored.marketing_agree = member.marketing_agree;
        stored.push_agree = member.push_agree;
        stored.refresh_token = member.refresh_token.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let mut data = self.inner.lock();
        let removed = data.members.remove(&id).is_some();
        if removed {
            data.onboarding.remove(&id);
            data.tickets.retain(|_, t| t.member_id != Some(id));
        }
        Ok(removed)
    }
}

#[async_trait]
impl CategoryRepository for MockStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .inner
            .lock()
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        Ok(self.inner.lock().categories.values().cloned().collect())
    }

    async fn update_image(&self, id: u64, kind: CategoryImageKind, url: &str) -> Result<Option<Category>> {
        let mut data = self.inner.lock();
        Ok(data.categories.get_mut(&id).map(|category| {
            match kind {
                CategoryImageKind::Basic => category.basic_image = Some(url.to_string()),
                CategoryImageKind::Click => category.click_image = Some(url.to_string()),
            }
            category.clone()
        }))
    }
}

#[async_trait]
impl OnboardingRepository for MockStore {
    async fn replace_categories(&self, member_id: u64, category_ids: &[u64]) -> Result<()> {
        let mut data = self.inner.lock();
        if !data.members.contains_key(&member_id) {
            return Err(anyhow!("Member not found: id={}", member_id));
        }
        data.onboarding.insert(member_id, category_ids.to_vec());
        Ok(())
    }

    async fn find_categories(&self, member_id: u64) -> Result<Vec<Category>> {
        let data = self.inner.lock();
        Ok(data
            .onboarding
            .get(&member_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| data.categories.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl TicketRepository for MockStore {
    async fn find_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .inner
            .lock()
            .tickets
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        sort_tickets(&mut tickets);
        Ok(tickets)
    }

    async fn monthly_statistics(
        &self,
        member_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MonthlyStatistic>> {
        let data = self.inner.lock();
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for ticket in data.tickets.values() {
            if ticket.member_id == Some(member_id) && start <= ticket.ticket_date && ticket.ticket_date < end {
                *counts.entry(ticket.category_name.clone()).or_insert(0) += 1;
            }
        }

        let mut stats: Vec<MonthlyStatistic> = counts
            .into_iter()
            .map(|(category_name, count)| MonthlyStatistic { category_name, count })
            .collect();
        // 개수 내림차순, 같으면 이름 오름차순
        stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category_name.cmp(&b.category_name)));
        Ok(stats)
    }

    async fn yearly_statistics(&self, member_id: u64, year: i32) -> Result<Vec<YearlyStatistic>> {
        let data = self.inner.lock();
        let mut counts: BTreeMap<u32, i64> = BTreeMap::new();
        for ticket in data.tickets.values() {
            if ticket.member_id == Some(member_id) && ticket.ticket_date.year() == year {
                *counts.entry(ticket.ticket_date.month()).or_insert(0) += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(month, count)| YearlyStatistic { year, month, count })
            .collect())
    }
}
