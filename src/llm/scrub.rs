use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

const SECRET_MARKERS: [&str; 4] = ["Bearer ", "api_key=", "access_token=", "sk-"];

const REDACTED: &str = "[REDACTED]";

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

/// Byte length of the credential-looking run at the start of `s`.
fn secret_len(s: &str) -> usize {
    s.find(|c: char| !is_secret_char(c)).unwrap_or(s.len())
}

fn redact_marker(text: &mut String, marker: &str) -> bool {
    let mut changed = false;
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(marker) {
        let start = cursor + found;
        let value_start = start + marker.len();
        let value_len = secret_len(&text[value_start..]);
        if value_len == 0 {
            cursor = value_start;
            continue;
        }
        text.replace_range(start..value_start + value_len, REDACTED);
        changed = true;
        cursor = start + REDACTED.len();
    }
    changed
}

/// Replace credential-looking tokens in backend output with `[REDACTED]`.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|marker| input.contains(marker)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    let mut modified = false;
    for marker in SECRET_MARKERS {
        modified |= redact_marker(&mut scrubbed, marker);
    }

    if modified {
        Cow::Owned(scrubbed)
    } else {
        Cow::Borrowed(input)
    }
}

/// Scrub secrets and cap the text at [`MAX_API_ERROR_CHARS`] characters.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    let cut = scrubbed
        .char_indices()
        .nth(MAX_API_ERROR_CHARS)
        .map(|(idx, _)| idx);
    match cut {
        Some(cut) => format!("{}...", &scrubbed[..cut]),
        None => scrubbed.into_owned(),
    }
}
