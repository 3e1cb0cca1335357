//! CGI form decoding (`application/x-www-form-urlencoded`).

use crate::error::{Error, Result};

/// Name of the form field holding the route tokens.
pub const SUMMARY_FIELD: &str = "summary-input";

/// Decode `+` and `%XX` escapes. Broken escapes are kept as written.
fn url_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = input.get(i + 1..i + 3).unwrap_or("");
                if hex.len() == 2 && hex.bytes().all(|c| c.is_ascii_hexdigit()) {
                    if let Ok(b) = u8::from_str_radix(hex, 16) {
                        out.push(b);
                        i += 3;
                        continue;
                    }
                }
                out.push(b'%');
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Value of `name` in a url encoded form body.
pub fn form_field(body: &str, name: &'static str) -> Result<String> {
    body.split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| url_decode(key) == name)
        .map(|(_, value)| url_decode(value))
        .ok_or(Error::MissingField(name))
}
