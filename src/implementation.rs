//! Feature detection.

/// Reports which optional feature sets this implementation provides.
///
/// # Examples
///
/// ```
/// use domcore::DomImplementation;
///
/// assert!(DomImplementation.has_feature("xml", "1.0"));
/// assert!(DomImplementation.has_feature("HTML", ""));
/// assert!(!DomImplementation.has_feature("XML", "2.0"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomImplementation;

impl DomImplementation {
    const FEATURES: [&'static str; 2] = ["XML", "HTML"];
    const VERSIONS: [&'static str; 2] = ["1.0", ""];

    /// Returns `true` for the `XML` and `HTML` features, matched without
    /// regard to case, at version `1.0` or an unspecified version.
    #[must_use]
    pub fn has_feature(&self, feature: &str, version: &str) -> bool {
        Self::FEATURES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(feature))
            && Self::VERSIONS.contains(&version)
    }
}
