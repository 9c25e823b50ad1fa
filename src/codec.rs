use std::collections::HashSet;

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

fn hex_digit(nibble: u8) -> char {
    char::from(b"0123456789ABCDEF"[usize::from(nibble & 0x0F)])
}

fn percent_triplet(bytes: &[u8], i: usize) -> Option<u8> {
    match (bytes.get(i), bytes.get(i + 1), bytes.get(i + 2)) {
        (Some(b'%'), Some(&hi), Some(&lo)) => Some(hex_value(hi)? << 4 | hex_value(lo)?),
        _ => None,
    }
}

/// Decode every well-formed `%XX` triplet of the element.  A `%` which does
/// not start a well-formed triplet is kept as a literal percent sign.
pub fn decode_element<T>(element: T) -> Vec<u8>
where
    T: AsRef<str>,
{
    let bytes = element.as_ref().as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if let Some(octet) = percent_triplet(bytes, i) {
            decoded.push(octet);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    decoded
}

/// Percent-encode every byte of the element which is not in the set of
/// allowed characters, using upper case hex digits.
pub fn encode_element<T>(element: T, allowed_characters: &HashSet<char>) -> String
where
    T: AsRef<[u8]>,
{
    let element = element.as_ref();
    let mut encoded = String::with_capacity(element.len());
    for &byte in element {
        let c = char::from(byte);
        if byte.is_ascii() && allowed_characters.contains(&c) {
            encoded.push(c);
        } else {
            encoded.push('%');
            encoded.push(hex_digit(byte >> 4));
            encoded.push(hex_digit(byte));
        }
    }
    encoded
}

/// Decode then re-encode the element, which canonicalizes existing
/// percent-encodings and escapes raw bytes outside the allowed set.
pub fn recode_element<T>(element: T, allowed_characters: &HashSet<char>) -> String
where
    T: AsRef<str>,
{
    encode_element(decode_element(element), allowed_characters)
}

/// Decode the `%XX` triplets of an already encoded element whose octet is
/// one of the given characters, leaving every other triplet alone.
pub fn decode_characters<T>(encoded: T, characters: &HashSet<char>) -> String
where
    T: AsRef<str>,
{
    let encoded = encoded.as_ref();
    let bytes = encoded.as_bytes();
    let mut decoded = String::with_capacity(encoded.len());
    let mut rest_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match percent_triplet(bytes, i) {
            Some(octet) if octet.is_ascii() && characters.contains(&char::from(octet)) => {
                decoded.push_str(&encoded[rest_start..i]);
                decoded.push(char::from(octet));
                i += 3;
                rest_start = i;
            }
            _ => i += 1,
        }
    }
    decoded.push_str(&encoded[rest_start..]);
    decoded
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::character_classes::{PATH_PRETTY, UNRESERVED};

    #[test]
    fn decode_leaves_malformed_triplets_alone() {
        struct Test {
            element: &'static str,
            decoded: &'static [u8],
        }
        let test_vectors: &[Test] = &[
            Test {
                element: "%41%4a%4B",
                decoded: b"AJK",
            },
            Test {
                element: "hello,%20w%6Frld",
                decoded: b"hello, world",
            },
            Test {
                element: "100%",
                decoded: b"100%",
            },
            Test {
                element: "%zz%4",
                decoded: b"%zz%4",
            },
            Test {
                element: "%bc",
                decoded: b"\xBC",
            },
        ];
        for test_vector in test_vectors {
            assert_eq!(test_vector.decoded, &decode_element(test_vector.element)[..]);
        }
    }

    #[test]
    fn encode_uses_two_upper_case_digits() {
        assert_eq!("%0A%20%E2%82%AC", encode_element("\n €", &UNRESERVED));
        assert_eq!("a-b_c.d~e", encode_element("a-b_c.d~e", &UNRESERVED));
    }

    #[test]
    fn recode_canonicalizes() {
        assert_eq!("A%2Fb%3A", recode_element("%41%2fb:", &UNRESERVED));
        assert_eq!("%C3%A9t%C3%A9", recode_element("été", &UNRESERVED));
    }

    #[test]
    fn decode_only_selected_characters() {
        assert_eq!(
            "(a)%2Fb:c%20",
            decode_characters("%28a%29%2Fb%3Ac%20", &PATH_PRETTY)
        );
        assert_eq!("%41", decode_characters("%2541", &PATH_PRETTY));
        assert_eq!("50%", decode_characters("50%", &PATH_PRETTY));
    }
}
