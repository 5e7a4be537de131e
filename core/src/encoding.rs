use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::Path,
};

use crate::error::Error;

pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8 or plain ASCII, passed through untouched
    SingleByte,
    /// UTF-16 little endian, always starts with a BOM
    Utf16Le,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unpaired surrogate {surrogate:#06x} at byte offset {offset}")]
    InvalidUtf16 { offset: usize, surrogate: u16 },
}

impl Encoding {
    /// Peeks at the first two bytes of `reader` and restores its position
    ///
    /// Anything shorter than two bytes is single byte.
    pub fn detect<R: Read + Seek>(reader: &mut R) -> std::io::Result<Self> {
        let start = reader.stream_position()?;
        let mut head = Vec::with_capacity(UTF16LE_BOM.len());
        Read::by_ref(reader)
            .take(UTF16LE_BOM.len() as u64)
            .read_to_end(&mut head)?;
        reader.seek(SeekFrom::Start(start))?;
        Ok(Self::detect_bytes(&head))
    }

    pub fn detect_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&UTF16LE_BOM) {
            Self::Utf16Le
        } else {
            Self::SingleByte
        }
    }

    /// Turns raw file contents into narrow text, UTF-16 is transcoded to UTF-8
    pub fn decode(self, bytes: Vec<u8>) -> Result<Vec<u8>, DecodeError> {
        match self {
            Self::SingleByte => Ok(strip_utf8_bom(bytes)),
            Self::Utf16Le => decode_utf16le(&bytes).map(String::into_bytes),
        }
    }
}

fn strip_utf8_bom(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.starts_with(&UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    bytes
}

fn decode_utf16le(bytes: &[u8]) -> Result<String, DecodeError> {
    let (body, base) = match bytes.strip_prefix(UTF16LE_BOM.as_slice()) {
        Some(body) => (body, UTF16LE_BOM.len()),
        None => (bytes, 0),
    };
    if body.len() % 2 != 0 {
        log::warn!("UTF-16 input has an odd trailing byte, ignoring it");
    }
    let units = body
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let mut out = String::with_capacity(body.len() / 2);
    let mut unit = 0;
    for c in char::decode_utf16(units) {
        match c {
            Ok(c) => {
                out.push(c);
                unit += c.len_utf16();
            }
            Err(err) => {
                return Err(DecodeError::InvalidUtf16 {
                    offset: base + unit * 2,
                    surrogate: err.unpaired_surrogate(),
                });
            }
        }
    }
    Ok(out)
}

/// Input read from disk, still in its original encoding
#[derive(Debug)]
pub struct RawInput {
    pub encoding: Encoding,
    pub bytes: Vec<u8>,
}

impl RawInput {
    pub fn decode(self) -> Result<Vec<u8>, DecodeError> {
        self.encoding.decode(self.bytes)
    }
}

/// Reads the whole file at `path` and closes it, decoding is left to the caller
pub fn read_input(path: &Path) -> Result<RawInput, Error> {
    let open_error = |source| Error::Open {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(open_error)?;
    let encoding = Encoding::detect(&mut file).map_err(open_error)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(open_error)?;
    drop(file);
    log::debug!("read {} bytes as {encoding:?}", bytes.len());
    Ok(RawInput { encoding, bytes })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read as _};

    use super::{DecodeError, Encoding, read_input};

    fn utf16le(s: &str) -> Vec<u8> {
        let mut out = vec![0xFF, 0xFE];
        out.extend(s.encode_utf16().flat_map(u16::to_le_bytes));
        out
    }

    #[test]
    fn detect_restores_position() {
        let mut cursor = Cursor::new(vec![0xFF, 0xFE, b'a', 0]);
        assert_eq!(Encoding::detect(&mut cursor).unwrap(), Encoding::Utf16Le);
        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest).unwrap();
        assert_eq!(rest.len(), 4);
    }

    #[test]
    fn detect_short_input() {
        assert_eq!(
            Encoding::detect(&mut Cursor::new(Vec::new())).unwrap(),
            Encoding::SingleByte
        );
        assert_eq!(
            Encoding::detect(&mut Cursor::new(vec![0xFF])).unwrap(),
            Encoding::SingleByte
        );
        assert_eq!(Encoding::detect_bytes(b"ab"), Encoding::SingleByte);
        assert_eq!(Encoding::detect_bytes(&[0xFE, 0xFF]), Encoding::SingleByte);
    }

    #[test]
    fn single_byte_passthrough() {
        let text = Encoding::SingleByte
            .decode(b"foo/bar.c\r\n".to_vec())
            .unwrap();
        assert_eq!(text, b"foo/bar.c\r\n");
    }

    #[test]
    fn single_byte_strips_utf8_bom() {
        let text = Encoding::SingleByte
            .decode(b"\xEF\xBB\xBFa.c\n".to_vec())
            .unwrap();
        assert_eq!(text, b"a.c\n");
    }

    #[test]
    fn utf16_transcodes_to_utf8() {
        let text = Encoding::Utf16Le
            .decode(utf16le("C:\\foo\\bär.c\r\n"))
            .unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "C:\\foo\\bär.c\r\n");
    }

    #[test]
    fn utf16_ignores_odd_trailing_byte() {
        let mut bytes = utf16le("a.c\n");
        bytes.push(b'x');
        let text = Encoding::Utf16Le.decode(bytes).unwrap();
        assert_eq!(text, b"a.c\n");
    }

    #[test]
    fn utf16_unpaired_surrogate() {
        let mut bytes = utf16le("ab");
        bytes.extend(0xD800u16.to_le_bytes());
        assert_eq!(
            Encoding::Utf16Le.decode(bytes),
            Err(DecodeError::InvalidUtf16 {
                offset: 6,
                surrogate: 0xD800
            })
        );
    }

    #[test]
    fn reading_succeeds_before_decoding_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.txt");
        let mut bytes = utf16le("a.c\n");
        bytes.extend(0xDC00u16.to_le_bytes());
        std::fs::write(&path, bytes).unwrap();
        let raw = read_input(&path).unwrap();
        assert_eq!(raw.encoding, Encoding::Utf16Le);
        assert!(matches!(
            raw.decode(),
            Err(DecodeError::InvalidUtf16 {
                surrogate: 0xDC00,
                ..
            })
        ));
    }
}
