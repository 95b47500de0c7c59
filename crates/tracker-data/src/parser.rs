//! Snapshot document parser.
//!
//! A snapshot is a plain-text voting report. Projects appear as three-line
//! blocks:
//!
//! ```text
//! Проект: <name>
//! 💫 Баллы: <integer>
//! ⭐️ Средний балл: <decimal>
//! ```
//!
//! Numbers are ASCII digits only. A block written with other digit scripts
//! does not match and contributes no record.
//!
//! Later reports also carry rank lines such as `🥇 1 место`, and end with a
//! `📅 Последнее обновление: 30.06.2025 10:19` line that names the snapshot.
//!
//! Ranks and project blocks are extracted as two independent streams and
//! zipped by position: the Nth rank belongs to the Nth project. Whichever
//! stream is longer has its tail dropped (ranks) or left unranked (projects).
//! This tolerates small drift between the two streams; a report layout that
//! interleaves ranks and projects differently needs a new pairing strategy.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use tracker_core::models::SnapshotRecord;
use tracker_core::{Result, TrackerError};

/// Glyph that opens the trailing "last updated" line.
pub const UPDATED_MARKER: &str = "📅";

/// Phrase that follows [`UPDATED_MARKER`] before the date and time.
pub const UPDATED_PREFIX: &str = "Последнее обновление:";

fn project_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"Проект: (.*?)\r?\n💫 Баллы: ([0-9]+)\r?\n⭐\x{FE0F}? Средний балл: ([0-9.]+)",
        )
        .expect("regex is valid")
    })
}

fn rank_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:🥇|🥈|🥉|🏅|🏆|🎖\x{FE0F}?)\s*([0-9]+)\s+место").expect("regex is valid")
    })
}

/// A project block before a rank has been attached.
#[derive(Debug, Clone, PartialEq)]
struct ProjectBlock {
    project: String,
    points: u64,
    average: f64,
}

/// Parse one snapshot document into records.
///
/// `fallback_label` names the snapshot when the document has no trailing
/// "last updated" line; callers pass the file stem. A document without any
/// project block yields an empty vector.
///
/// Fails with [`TrackerError::Format`] when a block has an empty project
/// name, or when a matched number cannot be converted (overflow, `"4.5.1"`,
/// a zero rank).
pub fn parse(document: &str, fallback_label: &str) -> Result<Vec<SnapshotRecord>> {
    let label = extract_label(document).unwrap_or_else(|| fallback_label.to_string());
    let blocks = extract_blocks(document)?;
    let ranks = extract_ranks(document)?;

    if ranks.len() != blocks.len() {
        debug!(
            "Snapshot {}: {} project blocks, {} rank lines; pairing by position",
            label,
            blocks.len(),
            ranks.len()
        );
    }

    Ok(pair_by_position(blocks, &ranks)
        .map(|(block, rank)| SnapshotRecord {
            project: block.project,
            points: block.points,
            average: block.average,
            rank,
            snapshot_label: label.clone(),
            source: fallback_label.to_string(),
        })
        .collect())
}

/// Derive the snapshot label from the document's last non-blank line.
///
/// Returns `None` when that line does not start with [`UPDATED_MARKER`], or
/// when nothing is left once the marker and prefix are removed.
pub fn extract_label(document: &str) -> Option<String> {
    let last_line = document
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())?;

    if !last_line.starts_with(UPDATED_MARKER) {
        return None;
    }

    // "30.06.2025 10:19" -> "10:19"
    last_line
        .replace(UPDATED_MARKER, "")
        .replace(UPDATED_PREFIX, "")
        .split_whitespace()
        .last()
        .map(str::to_string)
}

fn extract_blocks(document: &str) -> Result<Vec<ProjectBlock>> {
    project_block_re()
        .captures_iter(document)
        .map(|caps| {
            let project = caps[1].trim();
            if project.is_empty() {
                return Err(TrackerError::format("project", &caps[1]));
            }
            let points = caps[2]
                .parse::<u64>()
                .map_err(|_| TrackerError::format("points", &caps[2]))?;
            let average = caps[3]
                .parse::<f64>()
                .map_err(|_| TrackerError::format("average", &caps[3]))?;
            Ok(ProjectBlock {
                project: project.to_string(),
                points,
                average,
            })
        })
        .collect()
}

fn extract_ranks(document: &str) -> Result<Vec<u32>> {
    rank_re()
        .captures_iter(document)
        .map(|caps| match caps[1].parse::<u32>() {
            Ok(rank) if rank >= 1 => Ok(rank),
            _ => Err(TrackerError::format("rank", &caps[1])),
        })
        .collect()
}

/// Attach the Nth rank to the Nth block. Blocks beyond the last rank get
/// `None`; ranks beyond the last block are dropped.
fn pair_by_position(
    blocks: Vec<ProjectBlock>,
    ranks: &[u32],
) -> impl Iterator<Item = (ProjectBlock, Option<u32>)> + '_ {
    blocks
        .into_iter()
        .enumerate()
        .map(move |(i, block)| (block, ranks.get(i).copied()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
