//! Managed vs custom domain grammar selection.

/// Which URL grammar applies.
///
/// Managed domains (e.g. `cdn.pixelbin.io`) carry the cloud name as the first
/// path segment after the version; custom domains are already bound to one
/// cloud and omit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainMode {
    #[default]
    Managed,
    Custom,
}

impl From<bool> for DomainMode {
    /// `true` selects the custom-domain grammar.
    fn from(is_custom_domain: bool) -> Self {
        if is_custom_domain {
            DomainMode::Custom
        } else {
            DomainMode::Managed
        }
    }
}

/// Options for [`url_to_obj`](super::url_to_obj).
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlToObjOptions {
    pub is_custom_domain: bool,
}

impl UrlToObjOptions {
    pub fn custom_domain() -> Self {
        Self {
            is_custom_domain: true,
        }
    }

    pub fn mode(&self) -> DomainMode {
        DomainMode::from(self.is_custom_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_selects_mode() {
        assert_eq!(UrlToObjOptions::default().mode(), DomainMode::Managed);
        assert_eq!(UrlToObjOptions::custom_domain().mode(), DomainMode::Custom);
    }
}
