use std::path::Path;

use anyhow::{Context, Result};
use scratchpad_core::RunOutcome;

use crate::app::App;
use crate::render;

/// Runs `target` in the batch session. A virtual file with content takes
/// precedence over a host path; an empty virtual file yields to a host file
/// of the same name. Returns false if the run emitted any error entry.
pub async fn run(app: &mut App, target: &str) -> Result<bool> {
    let mut receiver = app.bridge.output().subscribe();

    let files = app.bridge.files();
    let has_content = !files.read(target).is_empty();
    let is_virtual = files.names().iter().any(|name| name == target);

    let outcome = if has_content {
        app.bridge.run_file(target)
    } else if Path::new(target).is_file() {
        let code = tokio::fs::read_to_string(target)
            .await
            .with_context(|| format!("Failed to read {}", target))?;
        app.bridge.run_code(&code, false)
    } else if is_virtual {
        app.bridge.run_file(target)
    } else {
        anyhow::bail!("No virtual file or host file named '{}'", target);
    };

    let saw_error = render::drain(&mut receiver);
    app.autosave().await;

    Ok(outcome == RunOutcome::Completed && !saw_error)
}
