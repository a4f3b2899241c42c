//! Shared utility functions.

use crate::types::ChannelId;

/// Maximum number of characters Discord accepts in one message.
pub const MESSAGE_LIMIT: usize = 2000;

/// Splits `content` into chunks of at most `max_chars` characters.
///
/// Chunks break after a newline whenever possible; a single line longer than
/// `max_chars` is broken at a character boundary. Concatenating the chunks
/// yields `content` exactly.
pub fn split_message(content: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in content.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len <= max_chars {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= max_chars {
            current.push_str(line);
            current_len = line_len;
            continue;
        }

        let mut rest = line;
        while rest.chars().count() > max_chars {
            let cut = rest
                .char_indices()
                .nth(max_chars)
                .map_or(rest.len(), |(index, _)| index);
            chunks.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        current.push_str(rest);
        current_len = rest.chars().count();
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Parses a channel reference: a raw id or a `<#id>` mention.
pub fn parse_channel_reference(input: &str) -> Option<ChannelId> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("<#")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(trimmed);

    digits.parse::<u64>().ok().filter(|id| *id != 0).map(ChannelId)
}
