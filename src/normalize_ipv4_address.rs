use super::{context::Context, error::Error};

/// Validate a dotted-decimal IPv4 address and return its canonical form:
/// exactly four decimal parts in [0, 255], without leading zeros.
pub fn normalize_ipv4_address<T>(address: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    let raw = address.as_ref();
    let parts = raw.trim().split('.').collect::<Vec<_>>();
    if parts.len() != 4 {
        return Err(Error::invalid(
            Context::Ipv4Address,
            raw,
            "expected exactly four dot-separated parts",
        ));
    }
    let octets = parts
        .iter()
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid(
                    Context::Ipv4Address,
                    *part,
                    "part is not a decimal number",
                ));
            }
            // Any number of leading zeros is fine, so strip them before
            // parsing to keep long zero runs from overflowing.
            let digits = part.trim_start_matches('0');
            if digits.is_empty() {
                return Ok(0);
            }
            digits
                .parse::<u8>()
                .map_err(|_| Error::invalid(Context::Ipv4Address, *part, "part exceeds 255"))
        })
        .collect::<Result<Vec<u8>, Error>>()?;
    Ok(octets
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("."))
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn good() {
        let test_vectors: &[(&str, &str)] = &[
            ("0.0.0.0", "0.0.0.0"),
            ("1.2.3.0", "1.2.3.0"),
            ("1.2.3.4", "1.2.3.4"),
            ("1.2.3.255", "1.2.3.255"),
            ("1.2.255.4", "1.2.255.4"),
            ("1.255.3.4", "1.255.3.4"),
            ("255.2.3.4", "255.2.3.4"),
            ("255.255.255.255", "255.255.255.255"),
            ("010.0.0.1", "10.0.0.1"),
            ("001.002.003.004", "1.2.3.4"),
            ("0000000000000127.0.0.1", "127.0.0.1"),
            ("  192.168.0.1\t", "192.168.0.1"),
        ];
        for (address, normalized) in test_vectors {
            assert_eq!(
                *normalized,
                normalize_ipv4_address(address).unwrap(),
                "{}",
                address
            );
        }
    }

    #[test]
    fn bad() {
        let test_vectors = [
            "",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.256",
            "1.2.3.-4",
            "1.2.3.+4",
            "1.2.3.4.",
            ".1.2.3.4",
            "1..2.3",
            "1.2.3.4.5.6",
            "1.2.3.4a",
            "1.2.3.4.5 ",
            "1.2.3.1e1",
            "1.2.3.0x1",
            "1.2.3.4 5",
            "300.1.1.1",
            "99999999999999999999.1.1.1",
        ];
        for test_vector in &test_vectors {
            assert!(
                normalize_ipv4_address(test_vector).is_err(),
                "{}",
                test_vector
            );
        }
    }

    #[test]
    fn error_names_offending_part() {
        match normalize_ipv4_address("1.2.300.4") {
            Err(Error::InvalidFormat { context, value, .. }) => {
                assert_eq!(Context::Ipv4Address, context);
                assert_eq!("300", value);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
