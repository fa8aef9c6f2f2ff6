//! Shared helpers for building throwaway git repositories

#![allow(dead_code)]

use git2::{Commit, Oid, Repository as Git2Repo, RepositoryInitOptions, Signature};
use tempfile::TempDir;

pub fn init_repo() -> (TempDir, Git2Repo) {
    let dir = TempDir::new().unwrap();
    let mut options = RepositoryInitOptions::new();
    options.initial_head("main");
    let repo = Git2Repo::init_opts(dir.path(), &options).unwrap();
    (dir, repo)
}

pub fn commit(repo: &Git2Repo, update_ref: Option<&str>, message: &str, parents: &[Oid]) -> Oid {
    let sig = Signature::now("Test", "test@example.com").unwrap();
    let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parents: Vec<Commit> = parents
        .iter()
        .map(|oid| repo.find_commit(*oid).unwrap())
        .collect();
    let parents: Vec<&Commit> = parents.iter().collect();

    repo.commit(update_ref, &sig, &sig, message, &tree, &parents)
        .unwrap()
}

pub fn tag(repo: &Git2Repo, name: &str, target: Oid) {
    let object = repo.find_object(target, None).unwrap();
    repo.tag_lightweight(name, &object, false).unwrap();
}

pub fn branch(repo: &Git2Repo, name: &str, target: Oid) {
    let commit = repo.find_commit(target).unwrap();
    repo.branch(name, &commit, false).unwrap();
}

/// main: initial (v0.1.0) -> second (v0.2.0-alpha.1) -> merge of feature/login
pub fn merged_feature_repo() -> (TempDir, Git2Repo, Oid) {
    let (dir, repo) = init_repo();

    let first = commit(&repo, Some("HEAD"), "initial", &[]);
    tag(&repo, "v0.1.0", first);

    let second = commit(&repo, Some("HEAD"), "second", &[first]);
    tag(&repo, "v0.2.0-alpha.1", second);

    let feature = commit(&repo, None, "add login", &[second]);
    branch(&repo, "feature/login", feature);

    let merge = commit(
        &repo,
        Some("HEAD"),
        "Merge pull request #12 from octo/feature/login\n\nAdd login",
        &[second, feature],
    );

    (dir, repo, merge)
}
