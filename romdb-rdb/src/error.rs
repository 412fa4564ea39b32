/// Errors that can occur while reading database text files.
#[derive(Debug, thiserror::Error)]
pub enum RdbError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RdbError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Read a text file, replacing invalid UTF-8 rather than failing.
pub fn read_text(path: &std::path::Path) -> Result<String, RdbError> {
    let bytes = std::fs::read(path).map_err(|e| RdbError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
