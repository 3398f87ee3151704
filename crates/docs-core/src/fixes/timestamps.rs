//! Git-derived `created`/`updated` timestamps
//!
//! Opt-in only: `fix all` skips it, since it needs a repository and
//! rewrites dates people may have set by hand.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use docs_content::{frontmatter, FrontmatterEditor};
use docs_fs::NormalizedPath;
use docs_schema::DocType;
use git2::{Oid, Repository, Sort};

use super::{Fix, FixContext, FixOutput};
use crate::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub struct Timestamps;

/// First and last commit times that touched a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHistory {
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

fn blob_at(repo: &Repository, tree_id: Oid, rel: &Path) -> Option<Oid> {
    let tree = repo.find_tree(tree_id).ok()?;
    tree.get_path(rel).ok().map(|entry| entry.id())
}

fn repo_relative(repo: &Repository, path: &NormalizedPath) -> Result<Option<PathBuf>> {
    let Some(workdir) = repo.workdir() else {
        return Ok(None);
    };
    let git_err = |e: std::io::Error| Error::Git {
        path: path.to_native(),
        message: e.to_string(),
    };
    let workdir = dunce::canonicalize(workdir).map_err(git_err)?;
    let file = dunce::canonicalize(path.to_native()).map_err(git_err)?;
    Ok(file.strip_prefix(&workdir).ok().map(Path::to_path_buf))
}

/// Commit history of `path`, or `None` when it has never been committed.
///
/// Renames are not followed: a moved file's history starts at the move.
pub fn file_history(path: &NormalizedPath) -> Result<Option<FileHistory>> {
    let native = path.to_native();
    let start = native.parent().unwrap_or(Path::new("."));
    let repo = Repository::discover(start).map_err(|e| Error::git(&native, e))?;
    let Some(rel) = repo_relative(&repo, path)? else {
        return Ok(None);
    };
    if repo.head().is_err() {
        return Ok(None);
    }

    let git = |e: git2::Error| Error::git(&native, e);
    let mut walk = repo.revwalk().map_err(git)?;
    walk.push_head().map_err(git)?;
    walk.set_sorting(Sort::TIME | Sort::REVERSE).map_err(git)?;

    let mut times: Option<(i64, i64)> = None;
    for oid in walk {
        let commit = repo.find_commit(oid.map_err(git)?).map_err(git)?;
        let Some(blob) = blob_at(&repo, commit.tree_id(), &rel) else {
            continue;
        };
        let unchanged = commit
            .parents()
            .any(|parent| blob_at(&repo, parent.tree_id(), &rel) == Some(blob));
        if unchanged {
            continue;
        }
        let seconds = commit.time().seconds();
        times = Some(match times {
            Some((first, last)) => (first.min(seconds), last.max(seconds)),
            None => (seconds, seconds),
        });
    }

    let to_utc = |seconds: i64| Utc.timestamp_opt(seconds, 0).single().unwrap_or_default();
    Ok(times.map(|(first, last)| FileHistory {
        created: to_utc(first),
        updated: to_utc(last),
    }))
}

impl Fix for Timestamps {
    fn name(&self) -> &'static str {
        "timestamps"
    }

    fn description(&self) -> &'static str {
        "Set created/updated from git history and migrate legacy date fields (not part of `all`)"
    }

    fn included_in_all(&self) -> bool {
        false
    }

    fn apply_to(&self, ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let Ok(parsed) = frontmatter::parse(content) else {
            return Ok(FixOutput::unchanged(content));
        };
        let Some(history) = file_history(ctx.path)? else {
            tracing::debug!(path = %ctx.path, "no git history, timestamps unchanged");
            return Ok(FixOutput::unchanged(content));
        };
        let Some(mut editor) = FrontmatterEditor::new(content)? else {
            return Ok(FixOutput::unchanged(content));
        };
        let fm = &parsed.frontmatter;
        let created = history.created.format(TIMESTAMP_FORMAT).to_string();
        let updated = history.updated.format(TIMESTAMP_FORMAT).to_string();

        let mut changes = 0;
        let migrated = !fm.contains_key("created") && editor.rename("date", "created");
        if editor.set("created", &created) || migrated {
            changes += 1;
        }
        let wants_updated = fm.contains_key("updated") || matches!(ctx.doc_type, DocType::Memo | DocType::Prd);
        if wants_updated && editor.set("updated", &updated) {
            changes += 1;
        }
        Ok(FixOutput::new(editor.finish(), changes))
    }
}
