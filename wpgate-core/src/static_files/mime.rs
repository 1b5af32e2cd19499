use std::fs::File;
use std::io::Read;
use std::path::Path;

const OCTET_STREAM: &str = "application/octet-stream";
const SNIFF_LEN: usize = 512;

/// Leading bytes of well-known binary formats.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
];

/// MIME type for a file: by extension first, then by content, then
/// `application/octet-stream`.
pub fn content_type_for(path: &Path) -> String {
    if let Some(mime) = mime_guess::from_path(path).first() {
        return mime.essence_str().to_string();
    }

    sniff(path).unwrap_or(OCTET_STREAM).to_string()
}

fn sniff(path: &Path) -> Option<&'static str> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)
        .ok()?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .ok()?;

    if head.is_empty() {
        return None;
    }

    if head.len() >= 12 && &head[..4] == b"RIFF" && &head[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    if let Some((_, mime)) = SIGNATURES.iter().find(|(magic, _)| head.starts_with(magic)) {
        return Some(*mime);
    }

    if looks_like_text(&head) {
        return Some("text/plain");
    }

    None
}

/// Valid UTF-8 (allowing a multi-byte char cut at the sniff boundary) with
/// no control bytes besides whitespace.
fn looks_like_text(head: &[u8]) -> bool {
    let valid = match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && head.len() == SNIFF_LEN,
    };

    valid
        && !head
            .iter()
            .any(|b| (*b < 0x20 && !matches!(*b, b'\t' | b'\n' | b'\r' | 0x0c)) || *b == 0x7f)
}
