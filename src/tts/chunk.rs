/// Longest text the translate_tts endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Split text into chunks of at most `max_chars` characters.
///
/// Cuts after sentence punctuation when possible, then at whitespace, then mid-word.
/// Chunks are trimmed and empty chunks are dropped.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let char_count = rest.chars().count();
        if char_count <= max_chars {
            chunks.push(rest.to_string());
            break;
        }

        let window_end = byte_offset(rest, max_chars);
        let window = &rest[..window_end];
        let cut = last_break(window, |c| matches!(c, '.' | '!' | '?' | ';' | ':' | ',' | '\n'))
            .or_else(|| last_break(window, char::is_whitespace))
            .unwrap_or(window_end);

        let chunk = rest[..cut].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        rest = rest[cut..].trim_start();
    }

    chunks
}

/// Byte offset just past the last char in `window` matching `is_break`.
fn last_break(window: &str, is_break: impl Fn(char) -> bool) -> Option<usize> {
    window
        .char_indices()
        .filter(|&(_, c)| is_break(c))
        .map(|(i, c)| i + c.len_utf8())
        .next_back()
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
