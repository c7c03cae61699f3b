//! URL string → [`ParsedUrl`].
//!
//! The path after the optional version (and, on managed domains, the cloud
//! name) is matched against a fixed, ordered list of shapes. The first shape
//! that fits wins; later shapes are never consulted.

use super::domain::DomainMode;
use super::error::UrlError;
use super::grammar::{self, WORKER_MARKER};
use super::model::{ParsedUrl, QueryOptions};

const MIN_CLOUD_NAME_LEN: usize = 3;
const ZONE_LEN: usize = 6;
/// Version assumed when the URL carries none.
const PARSE_DEFAULT_VERSION: &str = "v1";

/// Path layouts after the cloud-name segment, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// `<zone>/wrkr/<worker path>`
    WorkerWithZone,
    /// `wrkr/<worker path>`
    Worker,
    /// `<zone>/<pattern>/<file path>`
    ZoneWithPattern,
    /// `<pattern>/<file path>`
    Pattern,
}

pub(crate) const SHAPES: [Shape; 4] = [
    Shape::WorkerWithZone,
    Shape::Worker,
    Shape::ZoneWithPattern,
    Shape::Pattern,
];

/// Path fields extracted by a matching shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathFields {
    Worker {
        zone: Option<String>,
        worker_path: String,
    },
    Transform {
        zone: Option<String>,
        pattern: String,
        file_path: String,
    },
}

impl Shape {
    pub(crate) fn matches(self, segs: &[&str]) -> Option<PathFields> {
        match self {
            Shape::WorkerWithZone => match segs {
                [zone, marker, rest @ ..]
                    if is_zone_slug(zone) && *marker == WORKER_MARKER && !rest.is_empty() =>
                {
                    Some(PathFields::Worker {
                        zone: Some(zone.to_string()),
                        worker_path: rest.join("/"),
                    })
                }
                _ => None,
            },
            Shape::Worker => match segs {
                [marker, rest @ ..] if *marker == WORKER_MARKER && !rest.is_empty() => {
                    Some(PathFields::Worker {
                        zone: None,
                        worker_path: rest.join("/"),
                    })
                }
                _ => None,
            },
            Shape::ZoneWithPattern => match segs {
                [zone, rest @ ..] if is_zone_slug(zone) && has_pattern_and_path(rest) => {
                    Some(PathFields::Transform {
                        zone: Some(zone.to_string()),
                        pattern: rest[0].to_string(),
                        file_path: rest[1..].join("/"),
                    })
                }
                _ => None,
            },
            Shape::Pattern if has_pattern_and_path(segs) => Some(PathFields::Transform {
                zone: None,
                pattern: segs[0].to_string(),
                file_path: segs[1..].join("/"),
            }),
            Shape::Pattern => None,
        }
    }
}

/// Parses a Pixelbin URL. `mode` decides whether a cloud-name segment is expected.
pub fn parse(input: &str, mode: DomainMode) -> Result<ParsedUrl, UrlError> {
    let parsed = url::Url::parse(input)?;

    let path = parsed.path();
    let decoded: Vec<String> = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(percent_decode)
        .collect();
    let mut segs: Vec<&str> = decoded.iter().map(String::as_str).collect();

    let mut version = PARSE_DEFAULT_VERSION.to_string();
    if segs.first().copied().is_some_and(is_version_token) {
        version = segs.remove(0).to_string();
    }

    let cloud_name = match mode {
        DomainMode::Custom => None,
        DomainMode::Managed => {
            let cloud = segs.first().copied().unwrap_or_default();
            if cloud.len() < MIN_CLOUD_NAME_LEN {
                return Err(UrlError::CloudNameTooShort(cloud.to_string()));
            }
            if !cloud.chars().all(is_slug_char) {
                return Err(UrlError::UnrecognizedShape);
            }
            Some(segs.remove(0).to_string())
        }
    };

    let (shape, fields) = SHAPES
        .iter()
        .find_map(|shape| shape.matches(&segs).map(|f| (*shape, f)))
        .ok_or(UrlError::UnrecognizedShape)?;
    tracing::trace!(?shape, ?mode, "matched url shape");

    let options = query_options(&parsed);
    let base_url = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host_str(&parsed), port),
        None => format!("{}://{}", parsed.scheme(), host_str(&parsed)),
    };

    let out = match fields {
        PathFields::Worker { zone, worker_path } => ParsedUrl {
            base_url,
            version,
            cloud_name,
            zone,
            worker: true,
            worker_path,
            pattern: String::new(),
            file_path: String::new(),
            options,
            transformations: Vec::new(),
        },
        PathFields::Transform {
            zone,
            pattern,
            file_path,
        } => ParsedUrl {
            base_url,
            version,
            cloud_name,
            zone,
            worker: false,
            worker_path: String::new(),
            transformations: grammar::decode_pattern(&pattern)?,
            pattern,
            file_path,
            options,
        },
    };
    Ok(out)
}

/// Percent-decodes one path segment; invalid UTF-8 is replaced, bad escapes kept.
pub(crate) fn percent_decode(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(s) => s.into_owned(),
        Err(_) => {
            let bytes = urlencoding::decode_binary(segment.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

fn host_str(u: &url::Url) -> &str {
    u.host_str().unwrap_or_default()
}

/// Keeps only `dpr` and `f_auto`, first occurrence, skipping empty values.
fn query_options(u: &url::Url) -> QueryOptions {
    let mut opts = QueryOptions::default();
    for (k, v) in u.query_pairs() {
        if v.is_empty() {
            continue;
        }
        match k.as_ref() {
            "dpr" if opts.dpr.is_none() => opts.dpr = Some(v.into_owned()),
            "f_auto" if opts.f_auto.is_none() => opts.f_auto = Some(v.into_owned()),
            _ => {}
        }
    }
    opts
}

pub(crate) fn is_version_token(s: &str) -> bool {
    matches!(s, "v1" | "v2")
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

pub(crate) fn is_zone_slug(s: &str) -> bool {
    s.len() == ZONE_LEN && s.chars().all(is_slug_char)
}

/// True when `segs` holds a non-empty pattern followed by a file-path remainder.
fn has_pattern_and_path(segs: &[&str]) -> bool {
    match segs {
        [] | [_] => false,
        [pattern, _] => !pattern.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_are_tried_in_order() {
        let segs = ["z-slug", "wrkr", "resize:w200", "image.jpeg"];
        assert_eq!(
            Shape::WorkerWithZone.matches(&segs),
            Some(PathFields::Worker {
                zone: Some("z-slug".into()),
                worker_path: "resize:w200/image.jpeg".into(),
            })
        );
        // A zone-looking first segment followed by a pattern is never a worker.
        let segs = ["z-slug", "t.flip()", "a.jpeg"];
        assert_eq!(Shape::WorkerWithZone.matches(&segs), None);
        assert!(Shape::ZoneWithPattern.matches(&segs).is_some());
    }

    #[test]
    fn pattern_shape_needs_file_path() {
        assert_eq!(Shape::Pattern.matches(&["original"]), None);
        assert_eq!(Shape::Pattern.matches(&["", "a.jpeg"]), None);
        assert_eq!(
            Shape::Pattern.matches(&["original", "dir", "a.jpeg"]),
            Some(PathFields::Transform {
                zone: None,
                pattern: "original".into(),
                file_path: "dir/a.jpeg".into(),
            })
        );
    }

    #[test]
    fn zone_slug_is_exactly_six_slug_chars() {
        assert!(is_zone_slug("z-slug"));
        assert!(is_zone_slug("ab_12C"));
        assert!(!is_zone_slug("abcde"));
        assert!(!is_zone_slug("abcdefg"));
        assert!(!is_zone_slug("ab.def"));
    }

    #[test]
    fn version_defaults_to_v1() {
        let p = parse(
            "https://cdn.pixelbin.io/demo-cloud/original/a.jpeg",
            DomainMode::Managed,
        )
        .unwrap();
        assert_eq!(p.version, "v1");
        assert_eq!(p.cloud_name.as_deref(), Some("demo-cloud"));
    }

    #[test]
    fn base_url_keeps_port() {
        let p = parse("http://localhost:8080/v2/original/a.jpeg", DomainMode::Custom).unwrap();
        assert_eq!(p.base_url, "http://localhost:8080");
    }

    #[test]
    fn unknown_query_parameters_are_dropped() {
        let p = parse(
            "https://cdn.pixelbin.io/v2/demo-cloud/original/a.jpeg?foo=1&dpr=2&dpr=3&f_auto=",
            DomainMode::Managed,
        )
        .unwrap();
        assert_eq!(p.options.dpr.as_deref(), Some("2"));
        assert!(p.options.f_auto.is_none());
    }

    #[test]
    fn path_segments_are_percent_decoded() {
        let p = parse(
            "https://cdn.pixelbin.io/v2/demo-cloud/t.resize(w:a%20b)/dir%20x/a.jpeg",
            DomainMode::Managed,
        )
        .unwrap();
        assert_eq!(p.file_path, "dir x/a.jpeg");
        assert_eq!(p.pattern, "t.resize(w:a b)");
        let values = p.transformations[0].values.as_ref().unwrap();
        assert_eq!(values[0].value.as_deref(), Some("a b"));

        // A literal space is encoded by the url parser and decoded back.
        let p = parse("https://img.example.com/v2/original/my file.jpeg", DomainMode::Custom).unwrap();
        assert_eq!(p.file_path, "my file.jpeg");
    }

    #[test]
    fn percent_decode_keeps_bad_escapes() {
        assert_eq!(percent_decode("a%2"), "a%2");
        assert_eq!(percent_decode("%41%zz"), "A%zz");
        assert_eq!(percent_decode("%FF.jpeg"), "\u{FFFD}.jpeg");
    }
}
