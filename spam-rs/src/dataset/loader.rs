//! Tab-separated message reader
//!
//! One message per line, `<label>\t<text>`. Everything after the first tab is
//! the message text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, SpamError};
use crate::spam::{Label, Message};

/// Read a labeled collection from a file
pub fn load_messages<P: AsRef<Path>>(path: P) -> Result<Vec<Message>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let messages = read_messages(BufReader::new(file))?;

    info!("Loaded {} messages from {}", messages.len(), path.display());
    Ok(messages)
}

/// Read a labeled collection from any buffered reader
pub fn read_messages<R: BufRead>(reader: R) -> Result<Vec<Message>> {
    let mut messages = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.trim().is_empty() {
            debug!("Skipping blank line {}", line_number);
            continue;
        }

        messages.push(parse_line(line, line_number)?);
    }

    Ok(messages)
}

fn parse_line(line: &str, line_number: usize) -> Result<Message> {
    let (label, text) = line.split_once('\t').ok_or_else(|| SpamError::Parse {
        line: line_number,
        message: "expected '<label>\\t<text>'".to_string(),
    })?;

    let label: Label = label.parse().map_err(|message| SpamError::Parse {
        line: line_number,
        message,
    })?;

    Ok(Message::new(text, label))
}
