//! Integration tests for the remote account store client.
//!
//! Offline tests always run. The live round-trip tests need a reachable
//! backend: set `HACKSWIPE_SYNC_URL`, `HACKSWIPE_SYNC_KEY` and
//! `HACKSWIPE_TEST_USER_ID` (an identity the key may write as) to enable
//! them; they are skipped otherwise.
//!
//! Run with:
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//! ```

use hackswipe::{DisplayProject, HistoryEntry, SwipeAction, SyncClient, UserDataParams};

fn credentials() -> Option<(String, String, String)> {
    let url = std::env::var("HACKSWIPE_SYNC_URL").ok()?;
    let key = std::env::var("HACKSWIPE_SYNC_KEY").ok()?;
    let user_id = std::env::var("HACKSWIPE_TEST_USER_ID").ok()?;
    Some((url, key, user_id))
}

fn sample_project(title: &str) -> DisplayProject {
    DisplayProject {
        title: title.to_string(),
        summary: format!("{title} does something useful"),
        prize: Some("Best Use of AI".to_string()),
        tech_stack: Some("Rust, Postgres".to_string()),
        github: None,
        youtube: Some("https://www.youtube.com/watch?v=abc123".to_string()),
        demo: None,
        team: None,
        date: Some("2026-01-07".to_string()),
        project_url: None,
    }
}

// ---------------------------------------------------------------------------
// Offline client behavior
// ---------------------------------------------------------------------------

#[test]
fn authorize_url_points_at_the_redirect_flow() {
    let client = SyncClient::new("https://acme.example.co/", "anon-key").unwrap();
    assert_eq!(
        client.auth().authorize_url("google", "http://localhost:5173"),
        "https://acme.example.co/auth/v1/authorize?provider=google&redirect_to=http://localhost:5173"
    );
}

#[test]
fn client_construction_trims_trailing_slashes() {
    // Both spellings must hit the same endpoints.
    let a = SyncClient::new("https://acme.example.co", "k").unwrap();
    let b = SyncClient::new("https://acme.example.co///", "k").unwrap();
    assert_eq!(
        a.auth().authorize_url("github", "x"),
        b.auth().authorize_url("github", "x")
    );
}

// ---------------------------------------------------------------------------
// Live round trips (env-gated)
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_returns_field_for_field_equal_data() {
    let Some((url, key, user_id)) = credentials() else {
        println!("Skipping live round-trip test (no credentials)");
        return;
    };
    let client = SyncClient::new(&url, &key).unwrap();

    let params = UserDataParams {
        liked: vec![sample_project("EchoNotes"), sample_project("PlantPal")],
        history: vec![
            HistoryEntry {
                title: "EchoNotes".into(),
                action: SwipeAction::Like,
                at: chrono::Utc::now(),
            },
            HistoryEntry {
                title: "Duds".into(),
                action: SwipeAction::Pass,
                at: chrono::Utc::now(),
            },
        ],
        position: 3,
        passed: vec![sample_project("Duds")],
        email: Some("tester@example.com".into()),
    };

    let saved = client.user_data().save_user_data(&user_id, &params).unwrap();
    assert_eq!(saved.user_id, user_id);

    let loaded = client.user_data().load_user_data(&user_id).unwrap();
    assert_eq!(loaded.liked_projects, params.liked);
    assert_eq!(loaded.passed_projects, params.passed);
    assert_eq!(loaded.current_index, params.position);
    assert_eq!(loaded.history, params.history);
    assert_eq!(loaded.user_email, params.email);
    println!(
        "Round trip ok: {} liked, {} passed, position {}",
        loaded.liked_projects.len(),
        loaded.passed_projects.len(),
        loaded.current_index
    );
}

#[test]
fn field_scoped_operations_share_the_upsert_discipline() {
    let Some((url, key, user_id)) = credentials() else {
        println!("Skipping live field-scoped test (no credentials)");
        return;
    };
    let client = SyncClient::new(&url, &key).unwrap();

    let liked = vec![sample_project("OnlyLiked")];
    client
        .user_data()
        .save_liked_projects(&user_id, &liked)
        .unwrap();
    assert_eq!(client.user_data().load_liked_projects(&user_id).unwrap(), liked);

    let history = vec![HistoryEntry {
        title: "OnlyLiked".into(),
        action: SwipeAction::Like,
        at: chrono::Utc::now(),
    }];
    client.user_data().save_history(&user_id, &history).unwrap();
    assert_eq!(client.user_data().load_history(&user_id).unwrap(), history);
}

#[test]
fn missing_record_returns_empty_defaults_not_an_error() {
    let Some((url, key, _)) = credentials() else {
        println!("Skipping live missing-record test (no credentials)");
        return;
    };
    let client = SyncClient::new(&url, &key).unwrap();

    // An identity that has never saved anything.
    let unknown = format!(
        "00000000-0000-4000-8000-{:012x}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
            & 0xffff_ffff_ffff
    );

    let data = client.user_data().load_user_data(&unknown).unwrap();
    assert_eq!(data.user_id, unknown);
    assert!(data.liked_projects.is_empty());
    assert!(data.history.is_empty());
    assert!(data.passed_projects.is_empty());
    assert_eq!(data.current_index, 0);

    assert!(client.user_data().load_liked_projects(&unknown).unwrap().is_empty());
    assert!(client.user_data().load_history(&unknown).unwrap().is_empty());
}
