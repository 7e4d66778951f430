//! Library surface of the `gherkin-tags` command-line tool.
//!
//! The binary lists, counts and filters the tags in Gherkin feature files.
//! Its configuration, logging and run loop live here so they can be tested
//! without spawning a process.
//!
//! # Configuration
//!
//! - `GHERKIN_TAGS_LOG_LEVEL`: log verbosity (trace, debug, info, warn,
//!   error)
//! - `GHERKIN_TAGS_MID_WORD`: whether an `@` inside a word may start a tag
//!   (allow, reject)
//!
//! Command-line flags override both.

pub mod config;
pub mod error;
pub mod logging;
pub mod run;
