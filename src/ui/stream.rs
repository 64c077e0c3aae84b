use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use std::io::Write;

use super::Spinner;
use crate::session::SessionError;

/// Writes a stream of translation prefixes to `out` as it arrives.
///
/// Each item is the whole translation so far; only the part not yet written
/// is printed. The spinner, if any, is cleared before the first output.
/// Returns the final translation.
pub async fn print_translation<S, W>(
    stream: S,
    out: &mut W,
    mut spinner: Option<Spinner>,
) -> Result<String>
where
    S: Stream<Item = Result<String, SessionError>>,
    W: Write,
{
    let mut stream = std::pin::pin!(stream);
    let mut translation = String::new();

    while let Some(prefix) = stream.next().await {
        let prefix = prefix?;
        if let Some(spinner) = spinner.take() {
            spinner.stop();
        }

        let delta = prefix.get(translation.len()..).unwrap_or_default();
        write!(out, "{delta}").context("Failed to write translation")?;
        out.flush().context("Failed to flush output")?;
        translation = prefix;
    }

    if !translation.is_empty() && !translation.ends_with('\n') {
        writeln!(out).context("Failed to write translation")?;
    }

    Ok(translation)
}
