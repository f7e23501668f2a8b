//! PostgREST adapter for the hosted `profiles` table.
//!
//! The backend schema is owned by the course operators; the DDL in
//! [`PROFILES_SETUP_SQL`] is surfaced to them when the table is missing.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::env;
use tokio::sync::broadcast;

use crate::repository::{ProfileChange, ProfileRecord, ProfileRepository, StorageError};

/// DDL for first-time backend setup, shown in the leaderboard remediation
/// panel when the table is missing.
pub const PROFILES_SETUP_SQL: &str = r#"-- 1. profiles 테이블 생성
CREATE TABLE profiles (
  id uuid DEFAULT gen_random_uuid() PRIMARY KEY,
  email text UNIQUE NOT NULL,
  nickname text NOT NULL,
  xp integer DEFAULT 0,
  level text DEFAULT 'Lv.1 인턴',
  progress integer DEFAULT 0,
  completed_missions integer DEFAULT 0,
  updated_at timestamp with time zone DEFAULT now()
);

-- 2. 모든 사용자가 데이터를 읽고 쓸 수 있도록 보안 정책(RLS) 설정
ALTER TABLE profiles ENABLE ROW LEVEL SECURITY;
CREATE POLICY "Allow all to public" ON profiles FOR ALL USING (true) WITH CHECK (true);

-- 3. 실시간 랭킹 업데이트를 위한 Realtime 활성화
ALTER PUBLICATION supabase_realtime ADD TABLE profiles;"#;

const DEFAULT_URL: &str = "https://tgnadgsvoerlgcfgpexq.supabase.co";
const DEFAULT_ANON_KEY: &str = "sb_publishable_rUKFpnXuxlqBmyrFbgIzNQ_lVpI-wTC";

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Connection parameters for the hosted backend. Unlike the generative
/// endpoint, the backend always has usable defaults (a public anon key).
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// Read `SUPABASE_URL` / `SUPABASE_ANON_KEY`, falling back to the
    /// hosted instance when the environment does not inject them.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: env::var("SUPABASE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
            anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_else(|_| DEFAULT_ANON_KEY.to_string()),
        }
    }

    fn profiles_endpoint(&self) -> String {
        format!("{}/rest/v1/profiles", self.url.trim_end_matches('/'))
    }
}

//
// ─── REST REPOSITORY ───────────────────────────────────────────────────────────
//

/// `ProfileRepository` over PostgREST.
///
/// Change notifications arrive out-of-band over the backend's realtime
/// websocket, which is owned by the host application; whatever drives that
/// subscription calls [`RestProfileRepository::notify_change`] to fan the
/// event out to local watchers.
pub struct RestProfileRepository {
    client: Client,
    config: BackendConfig,
    changes: broadcast::Sender<ProfileChange>,
}

impl RestProfileRepository {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            client: Client::new(),
            config,
            changes,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(BackendConfig::from_env())
    }

    /// Fan a backend change notification out to local watchers.
    pub fn notify_change(&self, email: impl Into<String>) {
        let _ = self.changes.send(ProfileChange {
            email: email.into(),
        });
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }

    async fn check(&self, response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        // PostgREST reports a missing relation as 42P01.
        if message.contains("42P01")
            || (status == StatusCode::NOT_FOUND && message.contains("relation"))
        {
            return Err(StorageError::MissingTable);
        }
        Err(StorageError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StorageError> {
        let response = self
            .authed(self.client.post(self.config.profiles_endpoint()))
            .query(&[("on_conflict", "email")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record)
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileRecord>, StorageError> {
        let response = self
            .authed(self.client.get(self.config.profiles_endpoint()))
            .query(&[
                ("select", "*"),
                ("email", &format!("eq.{email}")),
                ("limit", "1"),
            ])
            .send()
            .await?;
        let response = self.check(response).await?;
        let mut rows: Vec<ProfileRecord> = response.json().await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn top_by_xp(&self, limit: usize) -> Result<Vec<ProfileRecord>, StorageError> {
        let response = self
            .authed(self.client.get(self.config.profiles_endpoint()))
            .query(&[
                ("select", "*"),
                ("order", "xp.desc"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    fn watch(&self) -> broadcast::Receiver<ProfileChange> {
        self.changes.subscribe()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trims_trailing_slash() {
        let config = BackendConfig {
            url: "https://example.supabase.co/".into(),
            anon_key: "k".into(),
        };
        assert_eq!(
            config.profiles_endpoint(),
            "https://example.supabase.co/rest/v1/profiles"
        );
    }

    #[test]
    fn setup_sql_creates_the_expected_columns() {
        for column in [
            "email",
            "nickname",
            "xp",
            "level",
            "progress",
            "completed_missions",
        ] {
            assert!(
                PROFILES_SETUP_SQL.contains(column),
                "setup SQL missing column {column}"
            );
        }
        assert!(PROFILES_SETUP_SQL.contains("CREATE TABLE profiles"));
    }

    #[tokio::test]
    async fn notify_change_reaches_watchers() {
        let repo = RestProfileRepository::new(BackendConfig {
            url: DEFAULT_URL.into(),
            anon_key: "k".into(),
        });
        let mut rx = repo.watch();
        repo.notify_change("a@x");
        assert_eq!(rx.recv().await.unwrap().email, "a@x");
    }
}
