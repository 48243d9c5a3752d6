// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Buffer copies for the native accessor boundary.
//
// Both encodings write into caller-owned memory and report the full length of
// the value, so a caller with a short buffer can retry with a larger one.
//
// UTF-8: NUL-terminated whenever the buffer is non-empty, truncated on a
// character boundary. Return value excludes the terminator.
//
// UTF-16: no terminator (mirrors a Java `char[]`), truncated without
// splitting a surrogate pair. Return value is in code units.

/// Copy `value` as NUL-terminated UTF-8 into `buf`.
pub fn copy_utf8(value: &str, buf: &mut [u8]) -> usize {
    let Some(room) = buf.len().checked_sub(1) else {
        return value.len();
    };

    let mut n = value.len().min(room);
    while !value.is_char_boundary(n) {
        n -= 1;
    }
    buf[..n].copy_from_slice(&value.as_bytes()[..n]);
    buf[n] = 0;
    value.len()
}

/// Copy `value` as UTF-16 code units into `buf`.
pub fn copy_utf16(value: &str, buf: &mut [u16]) -> usize {
    let mut written = 0;
    let mut unit = [0u16; 2];
    for ch in value.chars() {
        let encoded = ch.encode_utf16(&mut unit);
        let end = written + encoded.len();
        if end > buf.len() {
            break;
        }
        buf[written..end].copy_from_slice(encoded);
        written = end;
    }
    utf16_len(value)
}

/// Length of `value` in UTF-16 code units.
pub fn utf16_len(value: &str) -> usize {
    value.chars().map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_fits() {
        let mut buf = [0xffu8; 8];
        assert_eq!(copy_utf8("fr_FR", &mut buf), 5);
        assert_eq!(&buf[..6], b"fr_FR\0");
    }

    #[test]
    fn utf8_truncates_and_terminates() {
        let mut buf = [0xffu8; 4];
        assert_eq!(copy_utf8("fr_FR", &mut buf), 5);
        assert_eq!(&buf, b"fr_\0");
    }

    #[test]
    fn utf8_never_splits_a_character() {
        // "é" is two bytes; a 3-byte buffer has room for "a" plus NUL only.
        let mut buf = [0xffu8; 3];
        assert_eq!(copy_utf8("aé", &mut buf), 3);
        assert_eq!(&buf[..2], b"a\0");
    }

    #[test]
    fn utf8_zero_capacity_only_measures() {
        let mut buf: [u8; 0] = [];
        assert_eq!(copy_utf8("en_US", &mut buf), 5);
    }

    #[test]
    fn utf8_empty_value() {
        let mut buf = [0xffu8; 2];
        assert_eq!(copy_utf8("", &mut buf), 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn utf16_fits() {
        let mut buf = [0u16; 8];
        let n = copy_utf16("de_AT", &mut buf);
        assert_eq!(n, 5);
        assert_eq!(String::from_utf16(&buf[..n]).expect("utf16"), "de_AT");
    }

    #[test]
    fn utf16_keeps_surrogate_pairs_whole() {
        // U+1F600 needs a surrogate pair.
        let value = "a\u{1F600}";
        assert_eq!(utf16_len(value), 3);

        let mut buf = [0u16; 2];
        assert_eq!(copy_utf16(value, &mut buf), 3);
        assert_eq!(buf, [u16::from(b'a'), 0]);
    }
}
