//! Shared test utilities for git-steward
//!
//! Integration tests run against real, throwaway git repositories so every
//! discard and submodule decision is checked against what git actually does.

pub mod assertions;
pub mod fixtures;
pub mod repository;
