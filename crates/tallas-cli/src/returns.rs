use std::path::Path;

use serde::Deserialize;
use tallas_core::{plan_return, validate_return, AppConfig, ReturnLine};

use crate::sizes::SizeEdit;

#[derive(Debug, Deserialize)]
struct ReturnRequest {
    received: ReturnLine,
    given: Vec<ReturnLine>,
    /// Size edits to persist alongside the return.
    #[serde(default)]
    sizes: Option<SizeEdit>,
}

/// Validates a return and, when size edits are attached, plans their writes.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any return rule fails.
pub(crate) fn run_check_return(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let request: ReturnRequest = crate::read_json(path)?;

    let output = match &request.sizes {
        Some(edit) => {
            // Cart rules are checked before the size matrices are even built.
            validate_return(&request.received, &request.given)?;
            let (baseline, desired) = edit.matrices(config)?;
            let plan = plan_return(&request.received, &request.given, &baseline, &desired)?;
            serde_json::to_string_pretty(&plan)?
        }
        None => {
            let summary = validate_return(&request.received, &request.given)?;
            serde_json::to_string_pretty(&summary)?
        }
    };

    println!("{output}");
    Ok(())
}
