//! Concatenate several clips into one.

use std::io::Write as _;
use std::path::PathBuf;
use tracing::{info, warn};

use montage_models::{ToolError, ToolResult};

use crate::tools::{allocate_in, MediaTools};

impl MediaTools {
    /// Join `filenames` into a single asset named `output_name`.
    ///
    /// Unless `preserve_order` is set, inputs are joined in lexicographic
    /// ascending order of filename. Inputs that cannot be found are
    /// skipped rather than failing the whole join (a large join should
    /// survive one missing clip). The first found input's directory is
    /// authoritative: both the transient file list and the output are
    /// written there.
    pub async fn concatenate_videos(
        &self,
        filenames: &[String],
        output_name: &str,
        preserve_order: bool,
        user_key: Option<&str>,
    ) -> ToolResult {
        if filenames.len() < 2 {
            return Err(ToolError::parameter(
                "Concatenation needs at least two input filenames",
            ));
        }

        let ordered = order_inputs(filenames.to_vec(), preserve_order);

        let mut found: Vec<PathBuf> = Vec::new();
        for name in &ordered {
            match self.resolver().find_input_file(name, user_key) {
                Some(path) => found.push(path),
                None => warn!(filename = %name, "Skipping missing input for concatenation"),
            }
        }

        if found.is_empty() {
            return Err(ToolError::not_found("Any of the input videos"));
        }

        let dir = found[0]
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.resolver().root().to_path_buf());
        let (out_path, final_name) = allocate_in(&dir, output_name);

        // The concat demuxer resolves relative entries against the list's
        // directory; absolute entries avoid that entirely. The temp file
        // is removed on drop, success or not.
        let mut list = tempfile::Builder::new()
            .prefix("concat_list_")
            .suffix(".txt")
            .tempfile_in(&dir)
            .map_err(|e| ToolError::internal(format!("Could not create file list: {e}")))?;
        for path in &found {
            writeln!(list, "file '{}'", path.display())
                .map_err(|e| ToolError::internal(format!("Could not write file list: {e}")))?;
        }
        list.flush()
            .map_err(|e| ToolError::internal(format!("Could not write file list: {e}")))?;

        let mut args: Vec<String> = ["-y", "-v", "error", "-f", "concat", "-safe", "0", "-i"]
            .map(String::from)
            .to_vec();
        args.push(list.path().to_string_lossy().into_owned());
        args.push("-c".to_string());
        args.push("copy".to_string());
        args.push(out_path.to_string_lossy().into_owned());

        let output = self.runner().run_raw(&args).await?;
        if !output.success() {
            return Err(ToolError::external(
                "Error concatenating videos",
                Some(output.stderr),
            ));
        }

        info!(inputs = found.len(), output = %out_path.display(), "Concatenation complete");

        let skipped = ordered.len() - found.len();
        let mut message = format!(
            "Successfully concatenated {} videos into {final_name}.",
            found.len()
        );
        if skipped > 0 {
            message.push_str(&format!(" ({skipped} missing input(s) skipped.)"));
        }
        Ok(message)
    }
}

/// Apply the join-order policy: caller order when preserved, otherwise
/// lexicographic ascending.
fn order_inputs(mut filenames: Vec<String>, preserve_order: bool) -> Vec<String> {
    if !preserve_order {
        filenames.sort();
    }
    filenames
}
