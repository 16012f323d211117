use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Locale name whose resources carry no suffix.
pub const DEFAULT_LOCALE: &str = "default";

/// Environment variable read by the boundary-only "current locale" helpers.
pub const LOCALE_ENV: &str = "LOCALE";

/// Suffix appended to resource and artifact names: empty for the default locale.
pub fn locale_suffix(locale: &str) -> &str {
    if locale == DEFAULT_LOCALE {
        ""
    } else {
        locale
    }
}

pub fn region_locale(locale: &str, region: &str) -> String {
    format!("{}_{}", locale, region)
}

/// Source of the region codes known for a language locale.
pub trait LocaleData: Send + Sync {
    fn region_codes(&self, locale: &str) -> Vec<String>;
}

static BUILTIN_REGIONS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("de", &["DE", "AT", "CH", "LI", "LU"][..]),
        ("en", &["US", "GB", "AU", "CA", "IE", "IN", "NZ", "ZA"][..]),
        ("es", &["ES", "MX", "AR", "CO", "CL", "US"][..]),
        ("fr", &["FR", "BE", "CA", "CH", "LU"][..]),
        ("it", &["IT", "CH"][..]),
        ("ja", &["JP"][..]),
        ("nl", &["NL", "BE"][..]),
        ("pt", &["PT", "BR"][..]),
        ("ru", &["RU"][..]),
        ("zh", &["CN", "TW", "HK", "SG"][..]),
    ])
});

/// Region table held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLocaleData {
    regions: HashMap<String, Vec<String>>,
}

impl StaticLocaleData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let regions = BUILTIN_REGIONS
            .iter()
            .map(|(locale, codes)| {
                (
                    locale.to_string(),
                    codes.iter().map(|code| code.to_string()).collect(),
                )
            })
            .collect();
        Self { regions }
    }

    /// Replaces the region list of `locale`.
    pub fn with_regions<I, S>(mut self, locale: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions
            .insert(locale.into(), codes.into_iter().map(Into::into).collect());
        self
    }

    pub fn extend(&mut self, regions: HashMap<String, Vec<String>>) {
        self.regions.extend(regions);
    }
}

impl LocaleData for StaticLocaleData {
    fn region_codes(&self, locale: &str) -> Vec<String> {
        self.regions.get(locale).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_has_empty_suffix() {
        assert_eq!(locale_suffix(DEFAULT_LOCALE), "");
        assert_eq!(locale_suffix("en"), "en");
        assert_eq!(region_locale("en", "US"), "en_US");
    }

    #[test]
    fn overrides_replace_builtin_regions() {
        let data = StaticLocaleData::builtin().with_regions("en", ["US"]);
        assert_eq!(data.region_codes("en"), vec!["US".to_string()]);
        assert_eq!(data.region_codes("pt"), vec!["PT".to_string(), "BR".to_string()]);
        assert!(data.region_codes("xx").is_empty());
    }
}
