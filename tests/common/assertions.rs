//! Predicates for git-steward command output

#![allow(dead_code)]

use predicates::prelude::*;

/// Error printed when the command runs outside a repository
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

pub fn has_state(description: &str) -> impl Predicate<str> {
    predicates::str::contains("State:").and(predicates::str::contains(description.to_string()))
}

pub fn has_success(message: &str) -> impl Predicate<str> {
    predicates::str::contains("✓").and(predicates::str::contains(message.to_string()))
}

pub fn has_error(message: &str) -> impl Predicate<str> {
    predicates::str::contains("Error:").and(predicates::str::contains(message.to_string()))
}
