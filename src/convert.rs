//! One-shot dataset conversion.
//!
//! Reads the raw scrape file produced by the Devpost scraper, derives one
//! [`DisplayProject`] per usable record and writes the result as the
//! application's static dataset. The transform is deterministic: identical
//! input always produces identical output.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::ConvertError;
use crate::models::{DisplayProject, RawProjectRecord};

/// Character cap for a single labeled aspect excerpt.
const EXCERPT_CAP: usize = 220;

/// Maximum number of technologies kept in the display string.
const MAX_TECH_ITEMS: usize = 6;

/// Title used when the scraper produced none. A placeholder title does not
/// exempt the record from the summary requirement.
const PLACEHOLDER_TITLE: &str = "Untitled Project";

/// Prize strings equal to this after trimming carry no information and are
/// dropped.
const PRIZE_PLACEHOLDER: &str = "Winner";

// ---------------------------------------------------------------------------
// Whole-file conversion
// ---------------------------------------------------------------------------

/// Convert the raw scrape file at `raw_path` and write the dataset artifact
/// to `dataset_path`.
///
/// The transform is atomic at the file level: the input is parsed in full
/// before any output exists, and the output is serialized in full before the
/// single write. Returns the converted records.
pub fn run(raw_path: &Path, dataset_path: &Path) -> Result<Vec<DisplayProject>, ConvertError> {
    let text = fs::read_to_string(raw_path).map_err(|e| ConvertError::Read {
        path: raw_path.to_path_buf(),
        source: e,
    })?;
    let raw: Vec<RawProjectRecord> =
        serde_json::from_str(&text).map_err(|e| ConvertError::Parse {
            path: raw_path.to_path_buf(),
            source: e,
        })?;

    let projects = convert_records(&raw);

    let json = match serde_json::to_string_pretty(&projects) {
        Ok(json) => json,
        Err(e) => {
            return Err(ConvertError::Write {
                path: dataset_path.to_path_buf(),
                source: std::io::Error::other(e),
            })
        }
    };
    if let Some(parent) = dataset_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConvertError::Write {
                path: dataset_path.to_path_buf(),
                source: e,
            })?;
        }
    }
    fs::write(dataset_path, json).map_err(|e| ConvertError::Write {
        path: dataset_path.to_path_buf(),
        source: e,
    })?;

    info!(
        raw = raw.len(),
        converted = projects.len(),
        dataset = %dataset_path.display(),
        "dataset written"
    );
    Ok(projects)
}

/// Read a previously written dataset artifact.
pub fn read_dataset(path: &Path) -> Result<Vec<DisplayProject>, ConvertError> {
    let text = fs::read_to_string(path).map_err(|e| ConvertError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| ConvertError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Convert every raw record, dropping the ones without a usable title/summary.
pub fn convert_records(raw: &[RawProjectRecord]) -> Vec<DisplayProject> {
    raw.iter().filter_map(convert_record).collect()
}

/// Derive a single display record. Returns `None` when no summary can be
/// synthesized; such records are excluded from the dataset entirely.
pub fn convert_record(raw: &RawProjectRecord) -> Option<DisplayProject> {
    let summary = synthesize_summary(raw)?;

    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(PLACEHOLDER_TITLE)
        .to_string();

    let tech_stack = if raw.built_with.is_empty() {
        None
    } else {
        Some(
            raw.built_with
                .iter()
                .take(MAX_TECH_ITEMS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    };

    let team: Vec<&str> = raw
        .team
        .iter()
        .filter_map(|m| m.name.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();
    let team = if team.is_empty() {
        None
    } else {
        Some(team.join(", "))
    };

    let project = DisplayProject {
        title,
        summary,
        prize: clean_prizes(&raw.prizes),
        tech_stack,
        github: raw.github_links.first().cloned(),
        youtube: canonical_watch_url(&raw.youtube_links),
        demo: raw.demo_url.clone(),
        team,
        date: raw
            .submitted_date
            .as_deref()
            .and_then(|d| d.split('T').next())
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        project_url: raw.project_url.clone(),
    };
    debug!(title = %project.title, "converted record");
    Some(project)
}

// ---------------------------------------------------------------------------
// Summary synthesis
// ---------------------------------------------------------------------------

/// The fixed, ordered set of descriptive aspects and their display labels.
fn aspects(raw: &RawProjectRecord) -> [(&'static str, Option<&str>); 8] {
    [
        ("Overview", raw.ai_summary.as_deref()),
        ("What it does", raw.what_it_does.as_deref()),
        ("Inspiration", raw.inspiration.as_deref()),
        ("How it was built", raw.how_we_built_it.as_deref()),
        ("Challenges", raw.challenges.as_deref()),
        ("Accomplishments", raw.accomplishments.as_deref()),
        ("Lessons learned", raw.what_we_learned.as_deref()),
        ("What's next", raw.whats_next.as_deref()),
    ]
}

/// Build the composite summary from the descriptive aspects.
///
/// Each present, non-empty aspect contributes a labeled excerpt. When no
/// aspect yields content the tagline is used verbatim, then a truncated
/// excerpt of the longest free-text field. `None` means the record has no
/// usable summary at all.
fn synthesize_summary(raw: &RawProjectRecord) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for (label, text) in aspects(raw) {
        let Some(text) = text else { continue };
        let excerpt = crisp_excerpt(text, EXCERPT_CAP);
        if !excerpt.is_empty() {
            parts.push(format!("{label}: {excerpt}"));
        }
    }
    if !parts.is_empty() {
        return Some(parts.join(" "));
    }

    if let Some(tagline) = raw.tagline.as_deref() {
        if !tagline.trim().is_empty() {
            return Some(tagline.to_string());
        }
    }

    let longest = aspects(raw)
        .into_iter()
        .map(|(_, text)| text)
        .chain([raw.full_description.as_deref()])
        .flatten()
        .max_by_key(|t| t.len())?;
    let excerpt = truncate_at_word(&strip_markup(longest), EXCERPT_CAP);
    if excerpt.is_empty() {
        None
    } else {
        Some(excerpt)
    }
}

/// Reduce free text to its first sentence, keeping a second sentence when the
/// pair stays under `cap`. Oversized single sentences are truncated at a word
/// boundary with an ellipsis marker, never mid-word.
fn crisp_excerpt(text: &str, cap: usize) -> String {
    let clean = strip_markup(text);
    if clean.is_empty() {
        return clean;
    }

    let (first, rest) = split_first_sentence(&clean);
    if first.len() >= cap {
        return truncate_at_word(first, cap);
    }
    if !rest.is_empty() {
        let (second, _) = split_first_sentence(rest);
        if !second.is_empty() && first.len() + 1 + second.len() < cap {
            return format!("{first} {second}");
        }
    }
    first.to_string()
}

/// Strip emphasis markup and collapse all whitespace runs to single spaces.
fn strip_markup(text: &str) -> String {
    let stripped: String = text.chars().filter(|&c| !matches!(c, '*' | '#')).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split at the first sentence terminator followed by whitespace (or the end
/// of the text). Returns (sentence, remainder).
fn split_first_sentence(text: &str) -> (&str, &str) {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if matches!(b, b'.' | b'!' | b'?') {
            let next = bytes.get(i + 1);
            if next.is_none() || next.is_some_and(|n| n.is_ascii_whitespace()) {
                let sentence = text[..=i].trim_end();
                let rest = text[i + 1..].trim_start();
                return (sentence, rest);
            }
        }
    }
    (text.trim_end(), "")
}

/// Truncate to at most `cap` characters at a word boundary, appending an
/// ellipsis marker. Text already within the cap is returned unchanged.
fn truncate_at_word(text: &str, cap: usize) -> String {
    if text.len() <= cap {
        return text.to_string();
    }
    let boundary = text
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= cap)
        .last()
        .unwrap_or(0);
    let head = &text[..boundary];
    let cut = head.rfind(char::is_whitespace).unwrap_or(head.len());
    let mut out = head[..cut].trim_end().to_string();
    out.push_str("...");
    out
}

// ---------------------------------------------------------------------------
// Field cleanup
// ---------------------------------------------------------------------------

/// Normalize the raw link list to a single canonical watch URL.
///
/// The first link containing a watch or shortened-domain marker wins
/// (case-sensitive substring match, no scoring). Otherwise the first link is
/// mined for an `embed/` identifier and a watch URL is rebuilt from it.
fn canonical_watch_url(links: &[String]) -> Option<String> {
    for link in links {
        if link.contains("youtube.com/watch") || link.contains("youtu.be/") {
            return Some(link.clone());
        }
    }

    let first = links.first()?;
    let start = first.find("embed/")? + "embed/".len();
    let rest = &first[start..];
    let end = rest.find('?').unwrap_or(rest.len());
    let id = &rest[..end];
    if id.is_empty() {
        None
    } else {
        Some(format!("https://www.youtube.com/watch?v={id}"))
    }
}

/// Collapse whitespace in each prize string, drop bare placeholders and join
/// the rest.
fn clean_prizes(prizes: &[String]) -> Option<String> {
    let cleaned: Vec<String> = prizes
        .iter()
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty() && p != PRIZE_PLACEHOLDER)
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join("; "))
    }
}
