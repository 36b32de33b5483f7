//! `Accept` header negotiation between plain JSON and the HATEOAS vendor type.

use axum::http::HeaderValue;
use mime::Mime;

/// Vendor media type whose representations carry hypermedia links.
pub const HATEOAS_JSON: &str = "application/vnd.darkhorse.hateos+json";

/// Representation selected for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Json,
    Hateoas,
}

impl Representation {
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Representation::Json => "application/json",
            Representation::Hateoas => HATEOAS_JSON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("{0} is not supported")]
    Unparseable(String),
    #[error("none of the requested media types ({0}) can be produced")]
    NotAcceptable(String),
}

fn is_plain_json(m: &Mime) -> bool {
    m.essence_str() == mime::APPLICATION_JSON.essence_str()
        || (m.type_() == mime::STAR && m.subtype() == mime::STAR)
        || (m.type_() == mime::APPLICATION && m.subtype() == mime::STAR)
}

/// Pick a representation for an `Accept` header. A missing or blank header
/// means plain JSON; media type parameters are ignored.
///
/// # Errors
/// [`MediaError::Unparseable`] if any listed media type is malformed;
/// [`MediaError::NotAcceptable`] if none of them is supported.
pub fn negotiate(accept: Option<&HeaderValue>) -> Result<Representation, MediaError> {
    let Some(raw) = accept else {
        return Ok(Representation::Json);
    };
    let text = raw.to_str().map_err(|_| {
        MediaError::Unparseable(String::from_utf8_lossy(raw.as_bytes()).into_owned())
    })?;
    if text.trim().is_empty() {
        return Ok(Representation::Json);
    }

    let parsed = text
        .split(',')
        .map(|part| part.trim().parse::<Mime>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| MediaError::Unparseable(text.to_owned()))?;

    if parsed
        .iter()
        .any(|m| m.essence_str().eq_ignore_ascii_case(HATEOAS_JSON))
    {
        Ok(Representation::Hateoas)
    } else if parsed.iter().any(is_plain_json) {
        Ok(Representation::Json)
    } else {
        Err(MediaError::NotAcceptable(text.to_owned()))
    }
}
