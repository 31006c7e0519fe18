//! Tests for the dataset normalizer.
//!
//! Run with:
//!
//! ```bash
//! cargo test --test normalizer
//! ```

use hackswipe::convert::{convert_record, convert_records, read_dataset, run};
use hackswipe::{DisplayProject, RawProjectRecord, RawTeamMember};

fn raw() -> RawProjectRecord {
    RawProjectRecord::default()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn record_without_any_text_is_dropped() {
    let record = RawProjectRecord {
        title: Some("Ghost Project".into()),
        built_with: vec!["Rust".into()],
        ..raw()
    };
    assert!(convert_record(&record).is_none());
    assert!(convert_records(&[record]).is_empty());
}

#[test]
fn placeholder_title_does_not_rescue_a_summaryless_record() {
    let record = RawProjectRecord {
        github_links: vec!["https://github.com/acme/thing".into()],
        ..raw()
    };
    assert!(convert_record(&record).is_none());
}

#[test]
fn missing_title_falls_back_to_placeholder() {
    let record = RawProjectRecord {
        tagline: Some("A thing that does things".into()),
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(project.title, "Untitled Project");
    assert!(!project.summary.is_empty());
}

// ---------------------------------------------------------------------------
// Summary synthesis
// ---------------------------------------------------------------------------

#[test]
fn tagline_only_record_uses_tagline_verbatim() {
    let record = RawProjectRecord {
        title: Some("EchoNotes".into()),
        tagline: Some("Voice memos that organize themselves".into()),
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(project.summary, "Voice memos that organize themselves");
}

#[test]
fn aspects_are_labeled_and_visited_in_order() {
    let record = RawProjectRecord {
        title: Some("PlantPal".into()),
        what_it_does: Some("Tracks soil moisture. Sends alerts when dry.".into()),
        inspiration: Some("My ferns kept dying.".into()),
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    let what = project.summary.find("What it does:").unwrap();
    let inspiration = project.summary.find("Inspiration:").unwrap();
    assert!(what < inspiration);
    assert!(project
        .summary
        .contains("Tracks soil moisture. Sends alerts when dry."));
}

#[test]
fn emphasis_markup_is_stripped_before_sentence_splitting() {
    let record = RawProjectRecord {
        title: Some("Md".into()),
        what_it_does: Some("**Bold claim**   about   the \n\n product. More text.".into()),
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert!(project.summary.contains("Bold claim about the product."));
    assert!(!project.summary.contains("**"));
}

#[test]
fn oversized_sentence_is_truncated_at_a_word_boundary() {
    let long = "word ".repeat(100);
    let record = RawProjectRecord {
        title: Some("Verbose".into()),
        what_it_does: Some(long),
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert!(project.summary.ends_with("..."));
    // No mid-word cut: stripping the label and the marker leaves whole words.
    let body = project
        .summary
        .strip_prefix("What it does: ")
        .unwrap()
        .strip_suffix("...")
        .unwrap();
    assert!(body.split_whitespace().all(|w| w == "word"));
}

#[test]
fn fallback_uses_longest_free_text_field() {
    let record = RawProjectRecord {
        title: Some("Fallback".into()),
        full_description: Some("The long form description of the project.".into()),
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(
        project.summary,
        "The long form description of the project."
    );
}

#[test]
fn synthesis_is_deterministic() {
    let record = RawProjectRecord {
        title: Some("Det".into()),
        ai_summary: Some("A deterministic pipeline. It never changes output.".into()),
        challenges: Some("Time zones.".into()),
        ..raw()
    };
    let a = convert_record(&record).unwrap();
    let b = convert_record(&record).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Video URL canonicalization
// ---------------------------------------------------------------------------

#[test]
fn embed_url_is_rebuilt_as_watch_url() {
    let record = RawProjectRecord {
        title: Some("Vid".into()),
        tagline: Some("has a video".into()),
        youtube_links: vec!["https://www.youtube.com/embed/abc123?x=1".into()],
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(
        project.youtube.as_deref(),
        Some("https://www.youtube.com/watch?v=abc123")
    );
}

#[test]
fn direct_watch_link_wins_over_embed() {
    let record = RawProjectRecord {
        title: Some("Vid".into()),
        tagline: Some("has a video".into()),
        youtube_links: vec![
            "https://www.youtube.com/embed/first?x=1".into(),
            "https://www.youtube.com/watch?v=second".into(),
        ],
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(
        project.youtube.as_deref(),
        Some("https://www.youtube.com/watch?v=second")
    );
}

#[test]
fn unusable_links_leave_video_absent() {
    let record = RawProjectRecord {
        title: Some("NoVid".into()),
        tagline: Some("no video".into()),
        youtube_links: vec!["https://example.com/clip".into()],
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert!(project.youtube.is_none());
    assert!(project.video_id().is_none());
}

#[test]
fn video_id_resolves_all_recognized_forms() {
    let forms = [
        ("https://www.youtube.com/watch?v=abc123&t=1", "abc123"),
        ("https://youtu.be/abc123?t=1", "abc123"),
        ("https://www.youtube.com/embed/abc123#start", "abc123"),
    ];
    for (url, id) in forms {
        let project = DisplayProject {
            title: "p".into(),
            summary: "s".into(),
            prize: None,
            tech_stack: None,
            github: None,
            youtube: Some(url.into()),
            demo: None,
            team: None,
            date: None,
            project_url: None,
        };
        assert_eq!(project.video_id(), Some(id), "for {url}");
    }
}

// ---------------------------------------------------------------------------
// Field cleanup
// ---------------------------------------------------------------------------

#[test]
fn bare_winner_placeholder_is_dropped_from_prizes() {
    let record = RawProjectRecord {
        title: Some("Prized".into()),
        tagline: Some("prize winner".into()),
        prizes: vec!["Winner".into(), "  Best   Use of AI ".into()],
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(project.prize.as_deref(), Some("Best Use of AI"));
}

#[test]
fn all_placeholder_prizes_leave_field_absent() {
    let record = RawProjectRecord {
        title: Some("Prized".into()),
        tagline: Some("t".into()),
        prizes: vec!["Winner".into(), "  Winner ".into()],
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert!(project.prize.is_none());
}

#[test]
fn tech_stack_is_capped_and_joined() {
    let record = RawProjectRecord {
        title: Some("Techy".into()),
        tagline: Some("t".into()),
        built_with: (1..=8).map(|i| format!("tech{i}")).collect(),
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(
        project.tech_stack.as_deref(),
        Some("tech1, tech2, tech3, tech4, tech5, tech6")
    );
}

#[test]
fn submitted_timestamp_is_truncated_to_calendar_date() {
    let record = RawProjectRecord {
        title: Some("Dated".into()),
        tagline: Some("t".into()),
        submitted_date: Some("2026-01-07T14:02:11Z".into()),
        team: vec![
            RawTeamMember {
                name: Some("Ada".into()),
            },
            RawTeamMember {
                name: Some("Grace".into()),
            },
        ],
        github_links: vec![
            "https://github.com/acme/one".into(),
            "https://github.com/acme/two".into(),
        ],
        ..raw()
    };
    let project = convert_record(&record).unwrap();
    assert_eq!(project.date.as_deref(), Some("2026-01-07"));
    assert_eq!(project.team.as_deref(), Some("Ada, Grace"));
    assert_eq!(project.github.as_deref(), Some("https://github.com/acme/one"));
}

// ---------------------------------------------------------------------------
// Whole-file conversion
// ---------------------------------------------------------------------------

#[test]
fn run_converts_a_raw_file_and_reports_the_count() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw.json");
    let dataset_path = dir.path().join("data/projects.json");

    std::fs::write(
        &raw_path,
        r#"[
            {
                "title": "EchoNotes",
                "tagline": "Voice memos that organize themselves",
                "builtWith": ["Rust", "Whisper"],
                "youtubeLinks": ["https://www.youtube.com/embed/abc123?x=1"],
                "submittedDate": "2026-01-07T10:00:00Z",
                "prizes": ["Winner", "Best Use of AI"]
            },
            { "title": "No Summary Here" }
        ]"#,
    )
    .unwrap();

    let projects = run(&raw_path, &dataset_path).unwrap();
    assert_eq!(projects.len(), 1);

    let reloaded = read_dataset(&dataset_path).unwrap();
    assert_eq!(reloaded, projects);
    assert_eq!(reloaded[0].title, "EchoNotes");
    assert_eq!(
        reloaded[0].youtube.as_deref(),
        Some("https://www.youtube.com/watch?v=abc123")
    );
}

#[test]
fn malformed_input_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw.json");
    let dataset_path = dir.path().join("projects.json");

    std::fs::write(&raw_path, "{ not json").unwrap();

    assert!(run(&raw_path, &dataset_path).is_err());
    assert!(!dataset_path.exists());
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("absent.json");
    let dataset_path = dir.path().join("projects.json");

    assert!(run(&raw_path, &dataset_path).is_err());
    assert!(!dataset_path.exists());
}
