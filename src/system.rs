use std::env;
use std::fs;

use tracing::debug;

use crate::parameter::Parameter;
use crate::request::Request;

const FRAMEBUFFER_SIZE: &str = "/sys/class/graphics/fb0/virtual_size";
const FRAMEBUFFER_DEPTH: &str = "/sys/class/graphics/fb0/bits_per_pixel";

/// Fills still-empty default-request fields from the host environment:
/// locale, text encoding, and (where a framebuffer is exposed) screen
/// resolution and color depth. Anything the host does not expose is left
/// unset.
pub(crate) fn populate_system_parameters(request: &mut Request) {
    let locale = host_locale();

    if request.get(Parameter::UserLanguage).is_none() {
        match &locale {
            Some(locale) => request.set(Parameter::UserLanguage, locale.language_tag()),
            None => debug!("no locale in environment, leaving user language unset"),
        }
    }

    if request.get(Parameter::DocumentEncoding).is_none() {
        let encoding = locale
            .as_ref()
            .and_then(|l| l.codeset.clone())
            .unwrap_or_else(|| "UTF-8".to_string());
        request.set(Parameter::DocumentEncoding, encoding);
    }

    if request.get(Parameter::ScreenResolution).is_none() {
        match screen_resolution() {
            Some(resolution) => request.set(Parameter::ScreenResolution, resolution),
            None => debug!("screen resolution unavailable, leaving unset"),
        }
    }

    if request.get(Parameter::ScreenColors).is_none() {
        match screen_colors() {
            Some(colors) => request.set(Parameter::ScreenColors, colors),
            None => debug!("screen color depth unavailable, leaving unset"),
        }
    }
}

struct HostLocale {
    language: String,
    region: Option<String>,
    codeset: Option<String>,
}

impl HostLocale {
    /// `en` + `US` composes to `en-US`; without a region the bare language
    /// code is used.
    fn language_tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }
}

fn host_locale() -> Option<HostLocale> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .filter(|value| !value.is_empty() && value != "C" && value != "POSIX")
        .find_map(|value| parse_locale(&value))
}

/// Parses POSIX locale strings such as `en_US.UTF-8` or `de_DE@euro`.
fn parse_locale(raw: &str) -> Option<HostLocale> {
    let raw = raw.split('@').next().unwrap_or(raw);
    let (tag, codeset) = match raw.split_once('.') {
        Some((tag, codeset)) if !codeset.is_empty() => (tag, Some(codeset.to_string())),
        Some((tag, _)) => (tag, None),
        None => (raw, None),
    };
    let (language, region) = match tag.split_once('_') {
        Some((language, region)) if !region.is_empty() => (language, Some(region.to_string())),
        Some((language, _)) => (language, None),
        None => (tag, None),
    };
    if language.is_empty() {
        return None;
    }
    Some(HostLocale {
        language: language.to_string(),
        region,
        codeset,
    })
}

fn screen_resolution() -> Option<String> {
    // The framebuffer reports "width,height".
    let raw = fs::read_to_string(FRAMEBUFFER_SIZE).ok()?;
    let (width, height) = raw.trim().split_once(',')?;
    Some(format!("{}x{}", width.trim(), height.trim()))
}

fn screen_colors() -> Option<String> {
    let depth = fs::read_to_string(FRAMEBUFFER_DEPTH).ok()?;
    let depth = depth.trim();
    if depth.is_empty() {
        None
    } else {
        Some(format!("{}-bit", depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_posix_locale() {
        let locale = parse_locale("en_US.UTF-8").unwrap();
        assert_eq!(locale.language_tag(), "en-US");
        assert_eq!(locale.codeset.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn parses_locale_without_codeset() {
        let locale = parse_locale("de_DE@euro").unwrap();
        assert_eq!(locale.language_tag(), "de-DE");
        assert_eq!(locale.codeset, None);
    }

    #[test]
    fn parses_bare_language() {
        let locale = parse_locale("fr").unwrap();
        assert_eq!(locale.language_tag(), "fr");
    }

    #[test]
    fn rejects_empty_locale() {
        assert!(parse_locale("").is_none());
        assert!(parse_locale(".UTF-8").is_none());
    }

    #[test]
    fn does_not_overwrite_preset_fields() {
        let mut request = Request::new()
            .user_language("pt-BR")
            .document_encoding("ISO-8859-1")
            .screen_resolution("800x600")
            .screen_colors("16-bit");

        populate_system_parameters(&mut request);

        assert_eq!(request.get(Parameter::UserLanguage), Some("pt-BR"));
        assert_eq!(request.get(Parameter::DocumentEncoding), Some("ISO-8859-1"));
        assert_eq!(request.get(Parameter::ScreenResolution), Some("800x600"));
        assert_eq!(request.get(Parameter::ScreenColors), Some("16-bit"));
    }

    #[test]
    fn derivation_never_panics_headless() {
        let mut request = Request::new();
        populate_system_parameters(&mut request);
        // Encoding always resolves; the screen fields may legitimately stay
        // empty on a headless host.
        assert!(request.get(Parameter::DocumentEncoding).is_some());
    }
}
