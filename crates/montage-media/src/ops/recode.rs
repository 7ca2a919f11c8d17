//! Recode a clip to a different container/quality.

use tracing::info;

use montage_models::{quality, OutputFormat, QualityTier, ToolError, ToolResult};

use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

impl MediaTools {
    /// Recode `filename` to `format` at the named `quality` tier.
    ///
    /// Unrecognized quality names fall back to the medium tier;
    /// unrecognized formats get no codec overrides and FFmpeg picks the
    /// container defaults. When `output_name` is absent the input's stem
    /// plus the new extension is used.
    pub async fn convert_video(
        &self,
        filename: &str,
        format: &str,
        quality_name: &str,
        output_name: Option<&str>,
        user_key: Option<&str>,
    ) -> ToolResult {
        let tier = QualityTier::parse(quality_name);
        let format = OutputFormat::parse(format);

        let input = self.resolve_input(filename, user_key)?;

        let desired = match output_name {
            Some(name) => name.to_string(),
            None => {
                let stem = input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "converted".to_string());
                format!("{stem}.{}", format.extension())
            }
        };
        let (out_path, final_name) = self.allocate_output(&desired, user_key)?;

        let mut cmd = FfmpegCommand::new(&input, &out_path);
        if let Some((vcodec, acodec)) = format.codecs() {
            cmd = cmd
                .video_codec(vcodec)
                .audio_codec(acodec)
                .preset(quality::DEFAULT_PRESET)
                .crf(tier.crf());
        }
        if let Some(scale) = tier.scale_filter() {
            cmd = cmd.video_filter(scale);
        }

        let output = self.runner().run(&cmd).await?;
        if !output.success() {
            return Err(ToolError::external(
                format!("Error converting {filename}"),
                Some(output.stderr),
            ));
        }

        let in_mb = std::fs::metadata(&input).map(|m| m.len()).unwrap_or(0) as f64 / 1024.0 / 1024.0;
        let out_mb =
            std::fs::metadata(&out_path).map(|m| m.len()).unwrap_or(0) as f64 / 1024.0 / 1024.0;

        info!(input = %input.display(), output = %out_path.display(), "Recode complete");

        let mut message = format!(
            "Successfully converted {filename} to {} ({in_mb:.1} MB -> {out_mb:.1} MB), saved as {final_name}.",
            format.extension()
        );
        if let Some(warning) = Self::small_output_warning(&out_path) {
            message.push_str(&warning);
        }
        Ok(message)
    }
}
