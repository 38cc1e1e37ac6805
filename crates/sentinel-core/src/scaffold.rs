//! Starter documents for a submission: spec, demo script, submission form
//! and differentiation note.

use crate::error::Result;
use crate::io::{atomic_write, ensure_dir, write_if_missing};
use std::path::{Path, PathBuf};

const SPEC_MD: &str = "# Product Spec

## Problem
Describe the pain point for vibe coders in one paragraph.

## Target User
Who has this pain and how often does it happen?

## Success Metrics
- Metric 1
- Metric 2

## Constraints
- Time
- Security/privacy
- Platform

## Acceptance Criteria
- [ ] Criterion 1
- [ ] Criterion 2

## Non-Goals
What this project intentionally does not do.
";

const DEMO_SCRIPT_MD: &str = "# 3-5 Minute Demo Script

## 0:00 - 0:30 Hook
State the problem and why current approaches fail.

## 0:30 - 1:30 Product Intro
Show what makes your solution unique.

## 1:30 - 3:30 Live Workflow
Walk through a realistic scenario end-to-end.

## 3:30 - 4:30 Reliability and Safety
Highlight tests, safeguards, and quality controls.

## 4:30 - 5:00 Outcome
Close with measurable value and who should use it first.
";

const SUBMISSION_MD: &str = "# Vibeathon Submission Metadata

- Discord username:
- GitHub profile link:
- GitHub repo link:
- Demo video link (YouTube or Loom):

## One-line Pitch

## Why this is useful

## Why this is different
";

const UNIQUE_EDGE_MD: &str = "# Unique Edge

## Existing approaches
List common alternatives and their tradeoffs.

## What we do differently
Describe your non-obvious differentiation.

## Why this matters
Tie differentiation to measurable user outcomes.
";

/// File name and body of every starter document, in write order.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("SPEC.md", SPEC_MD),
    ("DEMO_SCRIPT.md", DEMO_SCRIPT_MD),
    ("SUBMISSION.md", SUBMISSION_MD),
    ("UNIQUE_EDGE.md", UNIQUE_EDGE_MD),
];

/// Write the starter documents into `output_dir`. Existing files are left
/// alone unless `force` is set. Returns the paths actually written.
pub fn scaffold(output_dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    ensure_dir(output_dir)?;
    let mut written = Vec::new();
    for (name, body) in TEMPLATES {
        let dest = output_dir.join(name);
        let created = if force {
            atomic_write(&dest, body.as_bytes())?;
            true
        } else {
            write_if_missing(&dest, body.as_bytes())?
        };
        if created {
            tracing::info!(path = %dest.display(), "wrote template");
            written.push(dest);
        }
    }
    Ok(written)
}
