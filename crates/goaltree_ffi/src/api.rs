//! FFI use-case API for UI-shell calls.
//!
//! # Responsibility
//! - Expose the goal tree command set as sync functions via FRB.
//! - Hand views to the renderer as JSON strings regenerated on every call.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One process-wide session; each call runs to completion under its lock.

use goaltree_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, load_forest_file,
    ping as ping_inner, sample_forest, Forest, GoalField, GoalTreeSession, GridMode, IngestResult,
    NodeId,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const FIXTURE_PATH_ENV: &str = "GOALTREE_FIXTURE_PATH";

static FIXTURE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();
static SESSION: Mutex<Option<GoalTreeSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic command response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalActionResponse {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl GoalActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Loads a goal forest and starts a fresh session.
///
/// Input semantics:
/// - `json`: forest JSON; when `None`, the file named by `GOALTREE_FIXTURE_PATH`
///   is used, falling back to the embedded sample.
///
/// # FFI contract
/// - Replaces any previous session, resetting collapse and depth state.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_load(json: Option<String>) -> GoalActionResponse {
    let loaded = match json {
        Some(text) => goaltree_core::load_forest_json(&text),
        None => load_default_forest(),
    };
    match loaded {
        Ok(forest) => {
            let roots = forest.len();
            match SESSION.lock() {
                Ok(mut guard) => {
                    *guard = Some(GoalTreeSession::new(forest));
                    GoalActionResponse::success(format!("Loaded {roots} root goal(s)."))
                }
                Err(_) => GoalActionResponse::failure("session_load failed: session lock poisoned"),
            }
        }
        Err(err) => GoalActionResponse::failure(format!("session_load failed: {err}")),
    }
}

/// Flips the collapsed flag of one node.
#[flutter_rust_bridge::frb(sync)]
pub fn session_toggle(node_id: String) -> GoalActionResponse {
    run_command("session_toggle", |session| {
        let collapsed = session
            .toggle(&NodeId::from(node_id.trim()))
            .map_err(|err| err.to_string())?;
        Ok(if collapsed { "Collapsed." } else { "Expanded." }.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_expand_all() -> GoalActionResponse {
    run_command("session_expand_all", |session| {
        session.expand_all();
        Ok("Expanded all.".to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_collapse_all() -> GoalActionResponse {
    run_command("session_collapse_all", |session| {
        session.collapse_all();
        Ok(format!("Collapsed {} node(s).", session.collapsed().len()))
    })
}

/// Marks one goal subtree done/undone and recomputes its ancestors.
#[flutter_rust_bridge::frb(sync)]
pub fn session_set_done(node_id: String, done: bool) -> GoalActionResponse {
    run_command("session_set_done", |session| {
        session
            .set_done(&NodeId::from(node_id.trim()), done)
            .map_err(|err| err.to_string())?;
        Ok("Progress updated.".to_string())
    })
}

/// Sets the depth window.
///
/// Input semantics:
/// - Negative values clamp to 0; `min > max` raises `max` to `min`.
/// - The applied window is echoed back in `message` as `min..=max`.
#[flutter_rust_bridge::frb(sync)]
pub fn session_set_depth_window(min_depth: i64, max_depth: i64) -> GoalActionResponse {
    let window = goaltree_core::DepthWindow::normalized(min_depth, max_depth);
    run_command("session_set_depth_window", |session| {
        let applied = session.set_depth_window(window.min(), window.max());
        Ok(format!("{}..={}", applied.min(), applied.max()))
    })
}

/// Replaces one scalar attribute (`name`, `description`, `specific`, ...).
#[flutter_rust_bridge::frb(sync)]
pub fn session_edit_field(node_id: String, field: String, value: String) -> GoalActionResponse {
    run_command("session_edit_field", |session| {
        let field = field.parse::<GoalField>().map_err(|err| err.to_string())?;
        session
            .edit_field(&NodeId::from(node_id.trim()), field, value)
            .map_err(|err| err.to_string())?;
        Ok("Field updated.".to_string())
    })
}

/// Switches the grid between `tree` and `flat` rows.
#[flutter_rust_bridge::frb(sync)]
pub fn session_set_grid_mode(mode: String) -> GoalActionResponse {
    run_command("session_set_grid_mode", |session| {
        let mode = match mode.trim().to_ascii_lowercase().as_str() {
            "tree" => GridMode::Tree,
            "flat" => GridMode::Flat,
            other => return Err(format!("unknown grid mode `{other}`; expected tree|flat")),
        };
        session.set_grid_mode(mode);
        Ok("Grid mode updated.".to_string())
    })
}

/// Installs a column filter; a blank `query` clears it.
#[flutter_rust_bridge::frb(sync)]
pub fn session_set_filter(field: String, query: String) -> GoalActionResponse {
    run_command("session_set_filter", |session| {
        let field = field.parse::<GoalField>().map_err(|err| err.to_string())?;
        session
            .set_filter(field, &query)
            .map_err(|err| err.to_string())?;
        Ok(if session.filter().is_some() {
            "Filter applied."
        } else {
            "Filter cleared."
        }
        .to_string())
    })
}

/// Returns the grid view as `{"mode": "...", "rows": [...]}`; empty string when no session.
#[flutter_rust_bridge::frb(sync)]
pub fn session_grid_json() -> String {
    render_view(|session| serde_json::to_string(&session.grid_view()))
}

/// Returns the positioned graph as `{"nodes": [...], "edges": [...]}`.
///
/// Empty string when no session is loaded.
#[flutter_rust_bridge::frb(sync)]
pub fn session_graph_json() -> String {
    render_view(|session| serde_json::to_string(&session.graph_layout()))
}

/// Returns the footer summary for one column, e.g. `✓ 8/8`.
#[flutter_rust_bridge::frb(sync)]
pub fn session_fill_stats(field: String) -> GoalActionResponse {
    run_command("session_fill_stats", |session| {
        let field = field.parse::<GoalField>().map_err(|err| err.to_string())?;
        Ok(session.fill_stats(field).to_string())
    })
}

fn run_command(
    name: &str,
    f: impl FnOnce(&mut GoalTreeSession) -> Result<String, String>,
) -> GoalActionResponse {
    let mut guard = match SESSION.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return GoalActionResponse::failure(format!("{name} failed: session lock poisoned"))
        }
    };
    let Some(session) = guard.as_mut() else {
        return GoalActionResponse::failure(format!("{name} failed: no session loaded"));
    };
    match f(session) {
        Ok(message) => GoalActionResponse::success(message),
        Err(err) => {
            warn!("event=ffi_command module=ffi status=error command={name}");
            GoalActionResponse::failure(format!("{name} failed: {err}"))
        }
    }
}

fn render_view(f: impl FnOnce(&GoalTreeSession) -> serde_json::Result<String>) -> String {
    let Ok(guard) = SESSION.lock() else {
        return String::new();
    };
    guard
        .as_ref()
        .and_then(|session| f(session).ok())
        .unwrap_or_default()
}

fn resolve_fixture_path() -> Option<PathBuf> {
    FIXTURE_PATH
        .get_or_init(|| {
            let raw = std::env::var(FIXTURE_PATH_ENV).ok()?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(PathBuf::from(trimmed))
        })
        .clone()
}

fn load_default_forest() -> IngestResult<Forest> {
    match resolve_fixture_path() {
        Some(path) => load_forest_file(path),
        None => sample_forest(),
    }
}
