//! URL slicing helpers
//!
//! These functions avoid a full URL parser and work directly on string slices.

// =============================================================================
// Scheme / Host
// =============================================================================

/// Get the position after "://".
#[inline]
pub fn get_scheme_end(url: &str) -> Option<usize> {
    let bytes = url.as_bytes();
    let colon_pos = bytes.iter().position(|&b| b == b':')?;

    // Relative references can carry "://" inside their query
    let valid_scheme = colon_pos > 0
        && bytes[..colon_pos]
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));
    if !valid_scheme {
        return None;
    }

    if bytes.len() > colon_pos + 2 && bytes[colon_pos + 1] == b'/' && bytes[colon_pos + 2] == b'/' {
        return Some(colon_pos + 3);
    }

    None
}

/// Get the start and end positions of the hostname in a URL.
#[inline]
pub fn get_host_position(url: &str) -> Option<(usize, usize)> {
    let scheme_end = get_scheme_end(url)?;
    let bytes = url.as_bytes();

    // Skip userinfo
    let mut host_start = scheme_end;
    for (i, &b) in bytes.iter().enumerate().skip(scheme_end) {
        if b == b'@' {
            host_start = i + 1;
            break;
        }
        if b == b'/' {
            break;
        }
    }

    let mut host_end = bytes.len();
    for (i, &b) in bytes.iter().enumerate().skip(host_start) {
        if b == b'/' || b == b'?' || b == b'#' || b == b':' {
            host_end = i;
            break;
        }
    }

    Some((host_start, host_end))
}

/// Host extraction without allocations.
#[inline]
pub fn extract_host(url: &str) -> Option<&str> {
    let (host_start, host_end) = get_host_position(url)?;
    Some(&url[host_start..host_end])
}

/// Everything after the authority: path, query and fragment.
/// Absolute URLs without a path yield "".
#[inline]
pub fn extract_path_and_query(url: &str) -> &str {
    let scheme_end = match get_scheme_end(url) {
        Some(pos) => pos,
        None => return url,
    };
    match url[scheme_end..].find(['/', '?', '#']) {
        Some(offset) => &url[scheme_end + offset..],
        None => "",
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Raw (still percent-encoded) value of the first `name` query parameter.
pub fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let q_pos = url.find('?')?;
    let query = match url[q_pos + 1..].find('#') {
        Some(hash_pos) => &url[q_pos + 1..q_pos + 1 + hash_pos],
        None => &url[q_pos + 1..],
    };

    query.split('&').find_map(|pair| match pair.find('=') {
        Some(eq_pos) if &pair[..eq_pos] == name => Some(&pair[eq_pos + 1..]),
        None if pair == name => Some(""),
        _ => None,
    })
}

/// Decode `%XX` escapes and `+` in a query component.
/// Returns None for malformed escapes or non-UTF-8 output.
pub fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = hex_value(*bytes.get(i + 1)?)?;
                let lo = hex_value(*bytes.get(i + 2)?)?;
                out.push(hi << 4 | lo);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
