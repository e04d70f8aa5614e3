// Hex substring scanner
// Finds word-bounded runs of hex characters that look like hash sums

/// Hash sums the scanner knows how to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    Md5,
    Sha1,
}

impl HashKind {
    /// Number of hex characters in a sum of this kind
    pub fn hex_len(self) -> usize {
        match self {
            HashKind::Md5 => 32,
            HashKind::Sha1 => 40,
        }
    }

    pub fn all() -> [HashKind; 2] {
        [HashKind::Md5, HashKind::Sha1]
    }
}

/// Returns true if the character is a valid hexadecimal digit
pub fn is_hex_char(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Search a line for a run of exactly `length` hex characters
///
/// The run must not touch another hex character on either side, so a hex
/// string that is too long is never split into a shorter match. The first
/// qualifying run wins and is returned with its original case.
pub fn find_hex_run(line: &str, length: usize) -> Option<&str> {
    if length == 0 {
        return None;
    }

    // Hex digits are ASCII, so byte offsets of a run are always char boundaries
    let bytes = line.as_bytes();
    let mut start = 0;
    let mut count = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_hexdigit() {
            start = i + 1;
            count = 0;
            continue;
        }

        count += 1;
        if count == length {
            let bounded = bytes
                .get(i + 1)
                .map_or(true, |next| !next.is_ascii_hexdigit());
            if bounded {
                return Some(&line[start..start + length]);
            }
        }
    }

    None
}

/// Returns the substring that looks like an MD5 sum
pub fn md5_in(line: &str) -> Option<&str> {
    find_hex_run(line, HashKind::Md5.hex_len())
}

/// Returns the substring that looks like a SHA1 sum
pub fn sha1_in(line: &str) -> Option<&str> {
    find_hex_run(line, HashKind::Sha1.hex_len())
}
