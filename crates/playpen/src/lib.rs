//! A library for staged, deadline-bounded code execution.
//!
//! Playpen takes an untrusted source-code string, stages it into an ephemeral
//! working directory, shells out to an external toolchain to initialize and
//! build-and-run it, and returns captured output or a classified error.
//!
//! # Features
//!
//! - **Scoped working areas** — Each run gets a fresh uniquely-named temp
//!   directory, removed on every exit path.
//! - **Shared deadline** — One wall-clock budget covers both the init and run
//!   steps; the in-flight process is killed when it elapses.
//! - **Swappable toolchain** — The compiler/runtime is an injectable trait, so
//!   tests can substitute a scripted fake.
//! - **TOML configuration** — Toolchain subcommands, source file name, and
//!   timeout are configurable.
//!
//! This is not a sandbox: nothing stops staged code from reading or writing
//! outside its working area at the OS permission level.

pub use config::{Config, ConfigError, EXAMPLE_CONFIG, ToolchainConfig};
pub use runner::{RunError, Runner, STDERR_SEPARATOR};
pub use toolchain::{CommandToolchain, Toolchain};
pub use types::ToolOutput;

pub mod config;
pub mod runner;
pub mod toolchain;
pub mod types;
