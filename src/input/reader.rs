use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads the text to translate from a file or stdin.
pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&Path>) -> Result<String> {
        match file_path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open file: {}", path.display()))?;
                Self::read_from(file)
                    .with_context(|| format!("Failed to read file: {}", path.display()))
            }
            None => Self::read_from(io::stdin().lock()).context("Failed to read from stdin"),
        }
    }

    /// Reads all of `reader`, refusing input larger than [`MAX_INPUT_SIZE`].
    pub fn read_from(reader: impl Read) -> Result<String> {
        let mut buffer = Vec::new();
        // One byte past the limit is enough to tell that it was exceeded.
        reader
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)?;

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(
                "Input exceeds maximum allowed size (1 MB).\n\n\
                 Consider splitting it into smaller parts."
            );
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}
