use super::{
    character_classes::is_ipv6_segment, context::Context, error::Error,
    normalize_ipv4_address::normalize_ipv4_address,
};

fn normalize_segment(segment: &str) -> String {
    match segment.trim_start_matches('0') {
        "" => String::from("0"),
        digits => digits.to_ascii_lowercase(),
    }
}

// Replace the first of the longest runs of zero groups with `::`.  A run of
// a single group is left alone since `::` would not make it any shorter.
fn shorten(groups: &[String]) -> String {
    let mut longest = 0..0;
    let mut start = None;
    for (i, group) in groups.iter().enumerate() {
        match (group == "0", start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s > longest.len() {
                    longest = s..i;
                }
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        if groups.len() - s > longest.len() {
            longest = s..groups.len();
        }
    }
    if longest.len() < 2 {
        return groups.join(":");
    }
    format!(
        "{}::{}",
        groups[..longest.start].join(":"),
        groups[longest.end..].join(":")
    )
}

/// Validate a textual IPv6 address (without brackets) and return its
/// canonical form.
///
/// Groups lose their leading zeros and are lower-cased.  An address which is
/// not already shortened gets its longest run of two or more zero groups
/// replaced with `::`; one which is already shortened keeps its `::` where it
/// is.  A trailing dotted-decimal IPv4 address ("dual" address) takes the
/// place of the last two groups and is normalized as an IPv4 address.
pub fn normalize_ipv6_address<T>(address: T) -> Result<String, Error>
where
    T: AsRef<str>,
{
    let raw = address.as_ref();
    let mut tokens = raw.trim().split(':').collect::<Vec<_>>();

    // The dual suffix has to come off first: its dots would otherwise be
    // taken for part of a malformed group.
    let ipv4 = match tokens.last() {
        Some(last) if last.trim() == *last => normalize_ipv4_address(last).ok(),
        _ => None,
    };
    if ipv4.is_some() {
        tokens.pop();
        if tokens.last().map_or(false, |token| token.is_empty()) {
            tokens.push("");
        }
    }

    let joined = tokens.join(":");
    if joined.contains(":::") {
        return Err(Error::invalid(
            Context::Ipv6Address,
            raw,
            "three or more consecutive colons",
        ));
    }
    let shortened = match joined.matches("::").count() {
        0 => false,
        1 => true,
        _ => {
            return Err(Error::invalid(
                Context::Ipv6Address,
                raw,
                "more than one `::`",
            ))
        }
    };
    if joined.starts_with(':') && !joined.starts_with("::") {
        return Err(Error::invalid(
            Context::Ipv6Address,
            raw,
            "leading colon is not part of `::`",
        ));
    }
    if joined.ends_with(':') && !joined.ends_with("::") {
        return Err(Error::invalid(
            Context::Ipv6Address,
            raw,
            "trailing colon is not part of `::`",
        ));
    }

    let required_groups = if ipv4.is_some() { 6 } else { 8 };
    let groups = tokens.iter().filter(|token| !token.is_empty()).count();
    if shortened {
        if groups > required_groups - 2 {
            return Err(Error::invalid(
                Context::Ipv6Address,
                raw,
                "too many groups for a shortened address",
            ));
        }
    } else if tokens.len() != required_groups {
        return Err(Error::invalid(
            Context::Ipv6Address,
            raw,
            "wrong number of groups",
        ));
    }

    let normalized = tokens
        .iter()
        .map(|token| {
            if token.is_empty() {
                Ok(String::new())
            } else if is_ipv6_segment(token) {
                Ok(normalize_segment(token))
            } else {
                Err(Error::invalid(
                    Context::Ipv6Address,
                    *token,
                    "group is not 1 to 4 hexadecimal digits",
                ))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut address = if shortened {
        normalized.join(":")
    } else {
        shorten(&normalized)
    };

    if let Some(ipv4) = ipv4 {
        if !address.ends_with(':') {
            address.push(':');
        }
        address.push_str(&ipv4);
    }
    Ok(address)
}
