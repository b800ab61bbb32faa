// TestDependencies - mock implementations for testing
//
// Provides an in-memory member store and call-recording mocks that can be
// injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{BaseMailer, BaseMemberStore, BaseWhitelistService, ServerDeps};
use crate::domains::member::Member;

// =============================================================================
// In-memory Member Store
// =============================================================================

/// Member store backed by a HashMap, for tests.
#[derive(Default)]
pub struct InMemoryMemberStore {
    records: Mutex<HashMap<Uuid, Member>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a record directly, bypassing the insert path.
    pub fn seed(&self, member: Member) {
        self.records.lock().unwrap().insert(member.id, member);
    }

    /// Snapshot of every stored record, oldest first.
    pub fn all(&self) -> Vec<Member> {
        let mut members: Vec<Member> = self.records.lock().unwrap().values().cloned().collect();
        members.sort_by_key(|m| m.created_at);
        members
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn attribute_matches(field: &Option<String>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(value) => field.as_deref() == Some(value),
        None => true,
    }
}

#[async_trait]
impl BaseMemberStore for InMemoryMemberStore {
    async fn insert(&self, member: &Member) -> Result<Member> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&member.id) {
            anyhow::bail!("duplicate member id {}", member.id);
        }
        records.insert(member.id, member.clone());
        Ok(member.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Member>> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, member: &Member) -> Result<Member> {
        let mut records = self.records.lock().unwrap();
        if !records.contains_key(&member.id) {
            anyhow::bail!("no member with id {}", member.id);
        }
        records.insert(member.id, member.clone());
        Ok(member.clone())
    }

    async fn find_by_attributes(
        &self,
        discord_id: Option<&str>,
        minecraft_username: Option<&str>,
    ) -> Result<Vec<Member>> {
        let mut members: Vec<Member> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|m| {
                attribute_matches(&m.discord_id, discord_id)
                    && attribute_matches(&m.minecraft_username, minecraft_username)
            })
            .cloned()
            .collect();
        members.sort_by_key(|m| m.created_at);
        Ok(members)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// Mock Mailer
// =============================================================================

/// Arguments captured from a send_welcome_email call
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub recipient_name: String,
    pub template_data: Value,
}

#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentEmail>>,
    always_fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails, for testing the unnotified path.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            always_fail: true,
        }
    }

    /// All emails sent so far, in order.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send_welcome_email(
        &self,
        recipient: &str,
        recipient_name: &str,
        template_data: Value,
    ) -> Result<()> {
        if self.always_fail {
            anyhow::bail!("mock mailer failure");
        }
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            recipient_name: recipient_name.to_string(),
            template_data,
        });
        Ok(())
    }
}

// =============================================================================
// Mock Whitelist
// =============================================================================

#[derive(Default)]
pub struct MockWhitelistService {
    calls: Mutex<Vec<String>>,
    fail_next: AtomicBool,
}

impl MockWhitelistService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next add_player call fail.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// All usernames passed to add_player, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_whitelisted(&self, minecraft_username: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|u| u == minecraft_username)
    }
}

#[async_trait]
impl BaseWhitelistService for MockWhitelistService {
    async fn add_player(&self, minecraft_username: &str) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("mock whitelist failure");
        }
        self.calls
            .lock()
            .unwrap()
            .push(minecraft_username.to_string());
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of test doubles plus handles for assertions.
pub struct TestDependencies {
    pub store: Arc<InMemoryMemberStore>,
    pub mailer: Arc<MockMailer>,
    pub whitelist: Arc<MockWhitelistService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryMemberStore::new()),
            mailer: Arc::new(MockMailer::new()),
            whitelist: Arc::new(MockWhitelistService::new()),
        }
    }

    /// Dependencies whose mailer fails every send.
    pub fn failing_mailer() -> Self {
        Self {
            mailer: Arc::new(MockMailer::failing()),
            ..Self::new()
        }
    }

    /// ServerDeps wired to these doubles.
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.store.clone(),
            self.mailer.clone(),
            Some(self.whitelist.clone() as Arc<dyn BaseWhitelistService>),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
