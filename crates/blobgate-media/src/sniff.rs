//! Byte-signature MIME detection.
//!
//! The table mirrors the WHATWG mime-sniffing registry for the formats this
//! gateway cares about: images, audio, video, and a handful of common
//! document/archive types. Detection only ever examines the first
//! [`SNIFF_LEN`] bytes.

/// Maximum number of leading bytes examined.
pub const SNIFF_LEN: usize = 512;

/// Fallback type when a payload matches no signature and is not textual.
pub const OCTET_STREAM: &str = "application/octet-stream";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";

enum Signature {
    /// Leading bytes equal `sig` exactly.
    Exact(&'static [u8], &'static str),
    /// `data[i] & mask[i] == pattern[i]` for every pattern byte.
    Masked {
        mask: &'static [u8],
        pattern: &'static [u8],
        mime: &'static str,
    },
    /// Case-insensitive HTML tag after optional leading whitespace,
    /// terminated by a space or `>`.
    Html(&'static [u8]),
    /// ISO BMFF: `ftyp` box at offset 4.
    Mp4,
}

const SIGNATURES: &[Signature] = &[
    // Images
    Signature::Exact(b"\xFF\xD8\xFF", "image/jpeg"),
    Signature::Exact(b"\x89PNG\r\n\x1A\n", "image/png"),
    Signature::Exact(b"GIF87a", "image/gif"),
    Signature::Exact(b"GIF89a", "image/gif"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WEBPVP",
        mime: "image/webp",
    },
    Signature::Exact(b"BM", "image/bmp"),
    Signature::Exact(b"\x00\x00\x01\x00", "image/x-icon"),
    Signature::Exact(b"II*\x00", "image/tiff"),
    Signature::Exact(b"MM\x00*", "image/tiff"),
    // Audio
    Signature::Exact(b"ID3", "audio/mpeg"),
    Signature::Exact(b"\xFF\xFB", "audio/mpeg"),
    Signature::Exact(b"\xFF\xF3", "audio/mpeg"),
    Signature::Exact(b"\xFF\xF2", "audio/mpeg"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WAVE",
        mime: "audio/wave",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"FORM\x00\x00\x00\x00AIFF",
        mime: "audio/aiff",
    },
    Signature::Exact(b"fLaC", "audio/flac"),
    Signature::Exact(b"MThd\x00\x00\x00\x06", "audio/midi"),
    Signature::Exact(b"OggS\x00", "application/ogg"),
    // Video
    Signature::Exact(b"\x1A\x45\xDF\xA3", "video/webm"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00AVI ",
        mime: "video/avi",
    },
    Signature::Exact(b"\x00\x00\x01\xBA", "video/mpeg"),
    Signature::Exact(b"\x00\x00\x01\xB3", "video/mpeg"),
    Signature::Mp4,
    // Documents and archives
    Signature::Exact(b"%PDF-", "application/pdf"),
    Signature::Exact(b"%!PS-Adobe-", "application/postscript"),
    Signature::Exact(b"PK\x03\x04", "application/zip"),
    Signature::Exact(b"\x1F\x8B\x08", "application/x-gzip"),
    Signature::Exact(b"\x00asm", "application/wasm"),
    // Markup
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<SCRIPT"),
];

/// Sniff a MIME type from a payload's leading bytes.
///
/// Falls back to `text/plain; charset=utf-8` for payloads with no binary
/// data bytes, and [`OCTET_STREAM`] otherwise. Never fails: every input
/// maps to some type.
pub fn sniff(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];
    for sig in SIGNATURES {
        if let Some(mime) = matches(sig, data) {
            return mime;
        }
    }
    if data.iter().any(|&b| is_binary_byte(b)) {
        OCTET_STREAM
    } else {
        TEXT_PLAIN
    }
}

fn matches(sig: &Signature, data: &[u8]) -> Option<&'static str> {
    match sig {
        Signature::Exact(pattern, mime) => data.starts_with(pattern).then_some(*mime),
        Signature::Masked { mask, pattern, mime } => {
            if data.len() < pattern.len() {
                return None;
            }
            let hit = pattern
                .iter()
                .zip(mask.iter())
                .zip(data.iter())
                .all(|((p, m), d)| d & m == *p);
            hit.then_some(*mime)
        }
        Signature::Html(tag) => {
            let trimmed = skip_whitespace(data);
            if trimmed.len() < tag.len() + 1 {
                return None;
            }
            let hit = tag
                .iter()
                .zip(trimmed.iter())
                .all(|(t, d)| t.eq_ignore_ascii_case(d));
            let terminator = trimmed[tag.len()];
            (hit && (terminator == b' ' || terminator == b'>')).then_some(TEXT_HTML)
        }
        Signature::Mp4 => {
            (data.len() >= 12 && &data[4..8] == b"ftyp").then_some("video/mp4")
        }
    }
}

fn skip_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|&b| !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

// Binary data bytes per the WHATWG mime-sniffing specification.
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_magic() {
        assert_eq!(sniff(b"\xFF\xD8\xFF\xE0rest-of-jfif"), "image/jpeg");
    }

    #[test]
    fn png_magic() {
        assert_eq!(sniff(b"\x89PNG\r\n\x1A\n\x00\x00\x00\x0DIHDR"), "image/png");
    }

    #[test]
    fn gif_magic_both_versions() {
        assert_eq!(sniff(b"GIF87a..."), "image/gif");
        assert_eq!(sniff(b"GIF89a..."), "image/gif");
    }

    #[test]
    fn webp_riff_container() {
        assert_eq!(sniff(b"RIFF\x24\x00\x00\x00WEBPVP8 "), "image/webp");
    }

    #[test]
    fn wave_riff_container() {
        assert_eq!(sniff(b"RIFF\x10\x00\x00\x00WAVEfmt "), "audio/wave");
    }

    #[test]
    fn avi_riff_container() {
        assert_eq!(sniff(b"RIFF\xAA\x00\x00\x00AVI LIST"), "video/avi");
    }

    #[test]
    fn riff_without_known_subtype_is_not_matched() {
        assert_eq!(sniff(b"RIFF\x10\x00\x00\x00ACONanih"), OCTET_STREAM);
    }

    #[test]
    fn mp3_magic() {
        assert_eq!(sniff(b"ID3\x04\x00\x00\x00\x00\x00\x00"), "audio/mpeg");
        assert_eq!(sniff(b"\xFF\xFB\x90\x64"), "audio/mpeg");
    }

    #[test]
    fn midi_magic() {
        assert_eq!(sniff(b"MThd\x00\x00\x00\x06\x00\x01"), "audio/midi");
    }

    #[test]
    fn matroska_magic() {
        assert_eq!(sniff(b"\x1A\x45\xDF\xA3\x42\x86"), "video/webm");
    }

    #[test]
    fn mp4_ftyp_box() {
        assert_eq!(sniff(b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00"), "video/mp4");
    }

    #[test]
    fn ftyp_needs_twelve_bytes() {
        assert_eq!(sniff(b"\x00\x00\x00\x18fty"), OCTET_STREAM);
    }

    #[test]
    fn mpeg_program_stream() {
        assert_eq!(sniff(b"\x00\x00\x01\xBA\x44\x00"), "video/mpeg");
    }

    #[test]
    fn pdf_magic() {
        assert_eq!(sniff(b"%PDF-1.7\n"), "application/pdf");
    }

    #[test]
    fn zip_magic() {
        assert_eq!(sniff(b"PK\x03\x04\x14\x00"), "application/zip");
    }

    #[test]
    fn wasm_magic() {
        assert_eq!(sniff(b"\x00asm\x01\x00\x00\x00"), "application/wasm");
    }

    #[test]
    fn html_tag_after_whitespace() {
        assert_eq!(sniff(b"  \n\t<html><body>hi</body></html>"), TEXT_HTML);
        assert_eq!(sniff(b"<!DOCTYPE HTML PUBLIC>"), TEXT_HTML);
    }

    #[test]
    fn html_tag_requires_terminator() {
        // "<htmlx" is not an html tag boundary.
        assert_eq!(sniff(b"<htmlx nonsense"), TEXT_PLAIN);
    }

    #[test]
    fn plain_text_fallback() {
        assert_eq!(sniff(b"hello, world\n"), TEXT_PLAIN);
    }

    #[test]
    fn empty_payload_is_textual() {
        assert_eq!(sniff(b""), TEXT_PLAIN);
    }

    #[test]
    fn binary_garbage_falls_back_to_octet_stream() {
        assert_eq!(sniff(&[0x01, 0x02, 0x03, 0x04]), OCTET_STREAM);
    }

    #[test]
    fn only_leading_bytes_are_examined() {
        // A JPEG magic past the 512-byte window must not match.
        let mut data = vec![b'a'; SNIFF_LEN];
        data.extend_from_slice(b"\xFF\xD8\xFF");
        assert_eq!(sniff(&data), TEXT_PLAIN);
    }
}
