//! Applying a generated script to a live instance.
//!
//! Statements run one at a time, in script order, through a
//! [`StatementExecutor`]. "Object already exists" is tolerated; any other
//! failure is logged and execution moves on, and the run as a whole is
//! reported as incomplete at the end. Nothing is rolled back.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{error, info};

use crate::ddl::OBJECT_EXISTS;

/// Longest statement prefix echoed into the log.
const LOG_PREVIEW: usize = 150;

/// Error raised by the database for one statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ORA-{code:05}: {message}")]
pub struct OracleError {
    pub code: u32,
    pub message: String,
}

impl OracleError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A connection able to run a single SQL or PL/SQL statement.
pub trait StatementExecutor {
    fn execute(&mut self, statement: &str) -> Result<(), OracleError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Not all statements executed successfully ({failed} of {total} failed)")]
    Incomplete { failed: usize, total: usize },
    #[error("Apply cancelled after {executed} statements")]
    Cancelled { executed: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub executed: usize,
    pub already_existing: usize,
}

/// Shared flag that stops an [`Applier`] before its next statement.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn is_comment_only(statement: &str) -> bool {
    (statement.starts_with("/*") && statement.ends_with("*/"))
        || statement
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with("--"))
}

fn is_create_user(statement: &str) -> bool {
    let mut words = statement.split_whitespace();
    matches!(
        (words.next(), words.next()),
        (Some(create), Some(user)) if create.eq_ignore_ascii_case("CREATE") && user.eq_ignore_ascii_case("USER")
    )
}

/// Executable form of one script unit, or `None` when it should be skipped.
fn prepare(unit: &str) -> Option<String> {
    let unit = unit.trim();
    if unit.is_empty() || is_comment_only(unit) || is_create_user(unit) {
        return None;
    }
    // PL/SQL blocks keep their final `END;` and lose the `/` terminator.
    if let Some(block) = unit.strip_suffix('/') {
        return Some(block.trim_end().to_string());
    }
    Some(unit.trim_matches(';').trim().to_string())
}

/// Statements to execute, in order. Users are not created by apply and
/// commented-out statements are skipped.
pub fn split_script(script: &str) -> Vec<String> {
    script.split("\n\n").filter_map(prepare).collect()
}

fn preview(statement: &str) -> &str {
    let line = statement.lines().next().unwrap_or_default();
    match line.char_indices().nth(LOG_PREVIEW) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Applier {
    cancel: CancelHandle,
}

impl Applier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn apply<E: StatementExecutor>(&self, executor: &mut E, script: &str) -> Result<ApplyReport, ApplyError> {
        let statements = split_script(script);
        let total = statements.len();
        let mut report = ApplyReport::default();
        let mut failed = 0;

        for statement in &statements {
            if self.cancel.is_cancelled() {
                return Err(ApplyError::Cancelled {
                    executed: report.executed,
                });
            }
            info!(target: "oraddl::apply", query = preview(statement), "executing statement");
            match executor.execute(statement) {
                Ok(()) => report.executed += 1,
                Err(err) if err.code == OBJECT_EXISTS => {
                    report.already_existing += 1;
                }
                Err(err) => {
                    error!(target: "oraddl::apply", code = err.code, error = %err, query = %statement, "statement failed");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(ApplyError::Incomplete { failed, total });
        }
        Ok(report)
    }
}

/// Apply `script` through `executor` without cancellation.
pub fn apply_script<E: StatementExecutor>(executor: &mut E, script: &str) -> Result<ApplyReport, ApplyError> {
    Applier::new().apply(executor, script)
}
