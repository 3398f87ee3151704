//! Git fixtures built with `git2`, so tests never depend on a `git` binary.

use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature, Time};

/// Initialise a repository with a committer identity configured.
///
/// # Panics
/// Panics if `git2` cannot create the repository.
pub fn init_repo(path: &Path) -> Repository {
    let repo = Repository::init(path)
        .unwrap_or_else(|e| panic!("init_repo: failed at {}: {e}", path.display()));
    {
        let mut config = repo.config().expect("init_repo: open config");
        config.set_str("user.name", "Test User").expect("init_repo: set user.name");
        config.set_str("user.email", "test@test.com").expect("init_repo: set user.email");
    }
    repo
}

/// Stage everything and commit with author and committer time `epoch_secs`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &Repository, message: &str, epoch_secs: i64) -> Oid {
    let mut index = repo.index().expect("commit_all: open index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("commit_all: stage files");
    index.write().expect("commit_all: write index");
    let tree_id = index.write_tree().expect("commit_all: write tree");
    let tree = repo.find_tree(tree_id).expect("commit_all: find tree");

    let signature = Signature::new("Test User", "test@test.com", &Time::new(epoch_secs, 0))
        .expect("commit_all: signature");
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_all: commit `{message}` failed: {e}"))
}
