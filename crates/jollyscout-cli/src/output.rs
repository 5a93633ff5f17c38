//! JSON output artifacts for one run.
//!
//! Two files per destination under the output directory: the full result
//! set in crawl order, and the top-K subset in rank order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use jollyscout_core::ResultSet;

/// Write `<destination>.json` and `<destination>_scored.json`, creating
/// the output directory on demand. Returns both paths.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or either file
/// cannot be serialized or written.
pub fn write_result_set(
    dir: &Path,
    destination: &str,
    result: &ResultSet,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output dir {}", dir.display()))?;

    let all_path = dir.join(format!("{destination}.json"));
    let all_json =
        serde_json::to_string_pretty(&result.all).context("serializing full result set")?;
    fs::write(&all_path, all_json).with_context(|| format!("writing {}", all_path.display()))?;

    let scored_path = dir.join(format!("{destination}_scored.json"));
    let scored_json =
        serde_json::to_string_pretty(&result.top_k).context("serializing top-k result set")?;
    fs::write(&scored_path, scored_json)
        .with_context(|| format!("writing {}", scored_path.display()))?;

    Ok((all_path, scored_path))
}
