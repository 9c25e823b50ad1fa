use super::{
    components::normalize_port, context::Context, error::Error, normalize_host::normalize_host,
};

// The port delimiter is the last colon, unless that colon sits inside a
// bracketed IPv6 address, and then only when what follows is a (possibly
// empty) run of digits.
fn split_port(host_port_string: &str) -> (&str, Option<&str>) {
    let closing_bracket = host_port_string.rfind(']');
    match host_port_string.rfind(':') {
        Some(colon) if closing_bracket.map_or(true, |bracket| colon > bracket) => {
            let port = &host_port_string[colon + 1..];
            if port.bytes().all(|b| b.is_ascii_digit()) {
                (&host_port_string[..colon], Some(port))
            } else {
                (host_port_string, None)
            }
        }
        _ => (host_port_string, None),
    }
}

fn parse_port(port_string: &str) -> Result<Option<u16>, Error> {
    if port_string.is_empty() {
        return Ok(None);
    }
    let port = port_string
        .parse::<u32>()
        .map_err(|_| Error::invalid(Context::Port, port_string, "must be in 1..=65535"))?;
    match normalize_port(port)? {
        0 => Ok(None),
        port => Ok(Some(port)),
    }
}

/// Split `host[:port]` and normalize both halves.  An empty host is kept
/// empty.
pub fn parse_host_port<T>(host_port_string: T) -> Result<(String, Option<u16>), Error>
where
    T: AsRef<str>,
{
    let (host, port) = split_port(host_port_string.as_ref());
    let port = match port {
        Some(port) => parse_port(port).map_err(|error| error.in_component(Context::Port))?,
        None => None,
    };
    let host = if host.is_empty() {
        String::new()
    } else {
        normalize_host(host).map_err(|error| error.in_component(Context::Host))?
    };
    Ok((host, port))
}
