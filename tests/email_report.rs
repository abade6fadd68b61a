//! Integration tests for the email report using a fake GitLab API.
//!
//! The fake paginates like GitLab: it caps page size, sets `next_page`
//! on every page but the last, and records each call so tests can check
//! what was requested.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use gitlab_emails::gitlab::{ApiError, GitLabApi, UsersPage};
use gitlab_emails::lister::{EmailLister, ListerError};
use gitlab_emails::models::{CurrentUser, EmailMap, ReportFormat, UserRecord};

/// In-memory GitLab with a server-side page size cap.
struct FakeGitLab {
    users: Vec<UserRecord>,
    max_page_size: u32,
    authenticate: bool,
    fail_on_page: Option<u32>,
    /// `(page, per_page)` of every `users_page` call.
    calls: Mutex<Vec<(u32, u32)>>,
}

impl FakeGitLab {
    fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            max_page_size: 20,
            authenticate: true,
            fail_on_page: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn numbered(count: u64) -> Self {
        Self::with_users(
            (1..=count)
                .map(|id| UserRecord {
                    id,
                    email: Some(format!("user{id:03}@example.com")),
                })
                .collect(),
        )
    }

    fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitLabApi for FakeGitLab {
    async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        if !self.authenticate {
            return Err(ApiError::Status {
                url: "https://gitlab.test/api/v4/user".into(),
                status: 401,
                body: r#"{"message":"401 Unauthorized"}"#.into(),
            });
        }
        Ok(CurrentUser {
            id: 1,
            username: "root".into(),
        })
    }

    async fn users_page(&self, page: u32, per_page: u32) -> Result<UsersPage, ApiError> {
        self.calls.lock().unwrap().push((page, per_page));
        if self.fail_on_page == Some(page) {
            return Err(ApiError::Status {
                url: "https://gitlab.test/api/v4/users".into(),
                status: 500,
                body: "Internal Server Error".into(),
            });
        }

        let size = per_page.min(self.max_page_size) as usize;
        let start = (page as usize - 1) * size;
        let users: Vec<UserRecord> = self.users.iter().skip(start).take(size).cloned().collect();
        let next_page = if start + size < self.users.len() {
            Some(page + 1)
        } else {
            None
        };
        Ok(UsersPage { users, next_page })
    }
}

fn sample_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: 1,
            email: Some("b@x.com".into()),
        },
        UserRecord {
            id: 2,
            email: Some("a@x.com".into()),
        },
    ]
}

async fn report(api: Arc<FakeGitLab>, format: ReportFormat) -> String {
    let lister = EmailLister::connect(api, 100).await.unwrap();
    let mut out = Vec::new();
    lister.run(format, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

// ---------------------------------------------------------------------------
// rendering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_example() {
    let api = Arc::new(FakeGitLab::with_users(sample_users()));
    assert_eq!(report(api, ReportFormat::List).await, "a@x.com\nb@x.com\n");
}

#[tokio::test]
async fn csv_example() {
    let api = Arc::new(FakeGitLab::with_users(sample_users()));
    assert_eq!(report(api, ReportFormat::Csv).await.trim_end(), "a@x.com, b@x.com");
}

#[tokio::test]
async fn json_example_keys_by_id() {
    let api = Arc::new(FakeGitLab::with_users(sample_users()));
    let output = report(api, ReportFormat::Json).await;

    assert_eq!(
        output,
        "{\n    \"1\": \"b@x.com\",\n    \"2\": \"a@x.com\"\n}\n"
    );
}

#[tokio::test]
async fn json_round_trips_to_fetched_mapping() {
    let api = Arc::new(FakeGitLab::numbered(57));
    let expected: EmailMap = api
        .users
        .iter()
        .map(|u| (u.id, u.email.clone().unwrap()))
        .collect();

    let output = report(api, ReportFormat::Json).await;
    let parsed: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&output).unwrap();

    let keys: Vec<u64> = parsed.keys().map(|k| k.parse().unwrap()).collect();
    let expected_keys: Vec<u64> = expected.keys().copied().collect();
    let mut sorted_keys = keys.clone();
    sorted_keys.sort();
    assert_eq!(keys.len(), expected_keys.len());
    assert_eq!(sorted_keys, expected_keys);

    let round_trip: EmailMap = serde_json::from_str(&output).unwrap();
    assert_eq!(round_trip, expected);
}

#[tokio::test]
async fn every_format_reports_the_same_email_set() {
    let users = vec![
        UserRecord { id: 5, email: Some("zed@x.com".into()) },
        UserRecord { id: 3, email: Some("amy@x.com".into()) },
        UserRecord { id: 9, email: Some("mo@x.com".into()) },
    ];
    let expected: BTreeSet<String> = users.iter().filter_map(|u| u.email.clone()).collect();

    let list = report(Arc::new(FakeGitLab::with_users(users.clone())), ReportFormat::List).await;
    let list_set: BTreeSet<String> = list.lines().map(String::from).collect();
    assert_eq!(list_set, expected);

    let csv = report(Arc::new(FakeGitLab::with_users(users.clone())), ReportFormat::Csv).await;
    let csv_set: BTreeSet<String> = csv.trim_end().split(", ").map(String::from).collect();
    assert_eq!(csv_set, expected);

    let json = report(Arc::new(FakeGitLab::with_users(users)), ReportFormat::Json).await;
    let map: EmailMap = serde_json::from_str(&json).unwrap();
    let json_set: BTreeSet<String> = map.into_values().collect();
    assert_eq!(json_set, expected);
}

#[tokio::test]
async fn list_lines_are_sorted() {
    let output = report(Arc::new(FakeGitLab::numbered(45)), ReportFormat::List).await;
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(lines.len(), 45);
}

#[tokio::test]
async fn csv_is_one_line_without_empty_fields() {
    let output = report(Arc::new(FakeGitLab::numbered(30)), ReportFormat::Csv).await;
    assert_eq!(output.lines().count(), 1);

    let fields: Vec<&str> = output.trim_end().split(", ").collect();
    assert_eq!(fields.len(), 30);
    assert!(fields.iter().all(|f| !f.is_empty()));
    assert!(fields.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn zero_users_is_an_empty_report() {
    let api = Arc::new(FakeGitLab::with_users(vec![]));
    assert_eq!(report(Arc::clone(&api), ReportFormat::List).await, "");
    assert_eq!(report(Arc::clone(&api), ReportFormat::Json).await, "{}\n");
}

// ---------------------------------------------------------------------------
// pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reports_all_users_across_pages() {
    // 25 users on an API that caps a page at 20
    let api = Arc::new(FakeGitLab::numbered(25));
    let lister = EmailLister::connect(Arc::clone(&api) as Arc<dyn GitLabApi>, 100)
        .await
        .unwrap();

    let emails = lister.fetch_emails().await.unwrap();
    assert_eq!(emails.len(), 25);
    assert_eq!(emails[&25], "user025@example.com");
    assert_eq!(api.calls(), vec![(1, 100), (2, 100)]);
}

#[tokio::test]
async fn requests_configured_page_size() {
    let api = Arc::new(FakeGitLab::numbered(12));
    let lister = EmailLister::connect(Arc::clone(&api) as Arc<dyn GitLabApi>, 5)
        .await
        .unwrap();

    let emails = lister.fetch_emails().await.unwrap();
    assert_eq!(emails.len(), 12);
    assert_eq!(api.calls(), vec![(1, 5), (2, 5), (3, 5)]);
}

#[tokio::test]
async fn exact_page_multiple_stops_after_last_page() {
    let api = Arc::new(FakeGitLab::numbered(40));
    let lister = EmailLister::connect(Arc::clone(&api) as Arc<dyn GitLabApi>, 20)
        .await
        .unwrap();

    assert_eq!(lister.fetch_emails().await.unwrap().len(), 40);
    assert_eq!(api.calls().len(), 2);
}

// ---------------------------------------------------------------------------
// failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authentication_failure_never_fetches_users() {
    let mut fake = FakeGitLab::numbered(3);
    fake.authenticate = false;
    let api = Arc::new(fake);

    let result = EmailLister::connect(Arc::clone(&api) as Arc<dyn GitLabApi>, 100).await;
    let err = result.unwrap_err();
    assert!(matches!(err, ListerError::Authentication(_)));
    let cause = std::error::Error::source(&err).unwrap().to_string();
    assert!(cause.contains("401"), "got: {cause}");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn fetch_failure_writes_nothing() {
    let mut fake = FakeGitLab::numbered(30);
    fake.fail_on_page = Some(2);
    let api = Arc::new(fake);

    let lister = EmailLister::connect(Arc::clone(&api) as Arc<dyn GitLabApi>, 20)
        .await
        .unwrap();
    let mut out = Vec::new();
    let err = lister.run(ReportFormat::List, &mut out).await.unwrap_err();

    assert!(matches!(err, ListerError::Fetch(_)));
    assert!(out.is_empty(), "partial report written");
}

#[tokio::test]
async fn user_without_email_fails_the_report() {
    let users = vec![
        UserRecord { id: 1, email: Some("a@x.com".into()) },
        UserRecord { id: 2, email: None },
        UserRecord { id: 3, email: Some("".into()) },
    ];
    let api = Arc::new(FakeGitLab::with_users(users));
    let lister = EmailLister::connect(api, 100).await.unwrap();

    let mut out = Vec::new();
    let err = lister.run(ReportFormat::Json, &mut out).await.unwrap_err();

    assert!(matches!(err, ListerError::Fetch(ApiError::Decode(_))));
    assert!(out.is_empty(), "partial report written");
}

#[tokio::test]
async fn connected_user_is_exposed() {
    let api = Arc::new(FakeGitLab::numbered(1));
    let lister = EmailLister::connect(api, 100).await.unwrap();
    assert_eq!(lister.user().username, "root");
}
