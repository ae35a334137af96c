use std::io::{self, Read};

/// Piped request text; `None` when stdin is a terminal or blank.
pub fn read_stdin() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = buffer.len(), "read request from stdin");
    Ok(Some(buffer))
}
