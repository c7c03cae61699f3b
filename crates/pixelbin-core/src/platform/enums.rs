use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visibility of an uploaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Access {
    #[default]
    #[serde(rename = "public-read")]
    PublicRead,
    #[serde(rename = "private")]
    Private,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::PublicRead => "public-read",
            Access::Private => "private",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public-read" => Ok(Access::PublicRead),
            "private" => Ok(Access::Private),
            other => Err(format!("invalid access type: {}", other)),
        }
    }
}
