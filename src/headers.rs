use super::error::Error;

// tchar from IETF RFC 7230 section 3.2.6.
fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}

pub(crate) fn check_token<T, F>(token: T, error: F) -> Result<T, Error>
where
    T: AsRef<str>,
    F: FnOnce(String) -> Error,
{
    if is_token(token.as_ref()) {
        Ok(token)
    } else {
        Err(error(token.as_ref().to_string()))
    }
}

fn normalize_value(name: &str, value: &str) -> Result<String, Error> {
    let value = value.trim_matches(|c| c == ' ' || c == '\t');
    if value.contains(&['\r', '\n', '\0'][..]) {
        return Err(Error::InvalidHeaderValue(name.to_string()));
    }
    Ok(value.to_string())
}

/// A collection of HTTP header fields.  Names are matched without regard to
/// case but keep the spelling they were first given; fields keep the order
/// in which they were added.
///
/// Like the rest of the message types, `Headers` is never modified in
/// place: every `with*` method returns an updated copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(String, Vec<String>)>,
}

impl Headers {
    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|(field_name, _)| field_name.eq_ignore_ascii_case(name))
    }

    /// Determine whether a header with the given name is present.
    #[must_use]
    pub fn has<T>(&self, name: T) -> bool
    where
        T: AsRef<str>,
    {
        self.position(name.as_ref()).is_some()
    }

    /// Borrow all values of the named header, which is empty if the header
    /// is not present.
    #[must_use]
    pub fn get<T>(&self, name: T) -> &[String]
    where
        T: AsRef<str>,
    {
        self.position(name.as_ref())
            .map_or(&[][..], |i| &self.fields[i].1[..])
    }

    /// Join all values of the named header with commas, the way they would
    /// appear on a single header line.
    #[must_use]
    pub fn get_line<T>(&self, name: T) -> String
    where
        T: AsRef<str>,
    {
        self.get(name).join(", ")
    }

    /// Return a copy with the named header set to exactly the given values,
    /// replacing any values it had.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHeaderName`](enum.Error.html#variant.InvalidHeaderName)
    /// or [`Error::InvalidHeaderValue`](enum.Error.html#variant.InvalidHeaderValue)
    /// is returned if the name is not a token or a value contains a line
    /// break.
    pub fn with_values<N, I, V>(&self, name: N, values: I) -> Result<Self, Error>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let name = check_token(name.as_ref(), Error::InvalidHeaderName)?;
        let values = values
            .into_iter()
            .map(|value| normalize_value(name, value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut headers = self.clone();
        match headers.position(name) {
            Some(i) => headers.fields[i].1 = values,
            None => headers.fields.push((name.to_string(), values)),
        }
        Ok(headers)
    }

    /// Return a copy with the named header set to a single value.
    ///
    /// # Errors
    ///
    /// See [`with_values`](#method.with_values).
    pub fn with_header<N, V>(&self, name: N, value: V) -> Result<Self, Error>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        self.with_values(name, std::iter::once(value))
    }

    /// Return a copy with the given value appended to the named header,
    /// adding the header if it was not present.
    ///
    /// # Errors
    ///
    /// See [`with_values`](#method.with_values).
    pub fn with_added_header<N, V>(&self, name: N, value: V) -> Result<Self, Error>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let name = check_token(name.as_ref(), Error::InvalidHeaderName)?;
        let value = normalize_value(name, value.as_ref())?;
        let mut headers = self.clone();
        match headers.position(name) {
            Some(i) => headers.fields[i].1.push(value),
            None => headers.fields.push((name.to_string(), vec![value])),
        }
        Ok(headers)
    }

    /// Return a copy without the named header.
    #[must_use]
    pub fn without_header<T>(&self, name: T) -> Self
    where
        T: AsRef<str>,
    {
        let mut headers = self.clone();
        headers
            .fields
            .retain(|(field_name, _)| !field_name.eq_ignore_ascii_case(name.as_ref()));
        headers
    }

    /// Iterate over the headers as names paired with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), &values[..]))
    }

    /// Count the distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Determine whether there are no headers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
