//! Landmark frame source: one JSON object per line, from stdin or a file.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::frame::Frame;

/// Open `path`, or stdin when no path (or `-`) is given.
pub fn open_source(path: Option<&Path>) -> Result<Box<dyn BufRead + Send>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let f = File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(f)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Frame>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let frame = serde_json::from_str(line)?;
    Ok(Some(frame))
}

/// Parse one raw input line; bytes that are not UTF-8 are a parse error
/// like any other bad line.
pub fn parse_bytes(line: &[u8]) -> Result<Option<Frame>> {
    let text = std::str::from_utf8(line).context("line is not valid UTF-8")?;
    parse_line(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        assert!(parse_line("   ").unwrap().is_none());
    }

    #[test]
    fn frame_without_hands() {
        let f = parse_line(r#"{"t":0.5,"width":640,"height":480}"#)
            .unwrap()
            .unwrap();
        assert_eq!(f.timestamp, 0.5);
        assert!(f.hands.is_empty());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_line("{not json").is_err());
        assert!(parse_line(r#"{"t":"soon","width":1,"height":1}"#).is_err());
    }

    #[test]
    fn invalid_utf8_is_a_line_error() {
        let err = parse_bytes(b"\xff\xfe garbage").unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
        assert!(parse_bytes(b"\r").unwrap().is_none());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = open_source(Some(Path::new("/nonexistent/frames.jsonl")))
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/frames.jsonl"));
    }
}
