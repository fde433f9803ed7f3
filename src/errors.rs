use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Failed to read attraction data {path:?}: {source}")]
    DataSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed attraction data{}: {message}", line_suffix(.line))]
    DataFormat {
        line: Option<u64>,
        message: String,
    },
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

impl MapError {
    pub fn format(line: Option<u64>, message: impl Into<String>) -> Self {
        MapError::DataFormat {
            line,
            message: message.into(),
        }
    }

    /// Errors reading the underlying stream are source errors; everything
    /// else the csv reader reports is a format error.
    pub fn from_csv(path: PathBuf, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        if !err.is_io_error() {
            return MapError::format(line, err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => MapError::DataSource { path, source },
            other => MapError::format(line, format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_names_line() {
        let err = MapError::format(Some(3), "bad latitude");
        assert_eq!(err.to_string(), "Malformed attraction data at line 3: bad latitude");

        let err = MapError::format(None, "missing column");
        assert_eq!(err.to_string(), "Malformed attraction data: missing column");
    }

    #[test]
    fn test_csv_io_error_is_source_error() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let err = MapError::from_csv(PathBuf::from("spots.csv"), csv::Error::from(io_err));
        assert!(matches!(err, MapError::DataSource { .. }));
    }
}
