/// A field of the Measurement Protocol. Each variant maps to the short
/// wire code the collector expects as a form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parameter {
    ProtocolVersion,
    TrackingId,
    AnonymizeIp,
    ClientId,
    SessionControl,
    HitType,
    AppName,
    AppVersion,
    UserLanguage,
    DocumentEncoding,
    ScreenResolution,
    ScreenColors,
    ViewportSize,
    DocumentUrl,
    DocumentHost,
    DocumentPath,
    DocumentTitle,
    DocumentReferrer,
    EventCategory,
    EventAction,
    EventLabel,
    EventValue,
}

impl Parameter {
    pub const ALL: [Parameter; 22] = [
        Parameter::ProtocolVersion,
        Parameter::TrackingId,
        Parameter::AnonymizeIp,
        Parameter::ClientId,
        Parameter::SessionControl,
        Parameter::HitType,
        Parameter::AppName,
        Parameter::AppVersion,
        Parameter::UserLanguage,
        Parameter::DocumentEncoding,
        Parameter::ScreenResolution,
        Parameter::ScreenColors,
        Parameter::ViewportSize,
        Parameter::DocumentUrl,
        Parameter::DocumentHost,
        Parameter::DocumentPath,
        Parameter::DocumentTitle,
        Parameter::DocumentReferrer,
        Parameter::EventCategory,
        Parameter::EventAction,
        Parameter::EventLabel,
        Parameter::EventValue,
    ];

    /// The short code used as the form key on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Parameter::ProtocolVersion => "v",
            Parameter::TrackingId => "tid",
            Parameter::AnonymizeIp => "aip",
            Parameter::ClientId => "cid",
            Parameter::SessionControl => "sc",
            Parameter::HitType => "t",
            Parameter::AppName => "an",
            Parameter::AppVersion => "av",
            Parameter::UserLanguage => "ul",
            Parameter::DocumentEncoding => "de",
            Parameter::ScreenResolution => "sr",
            Parameter::ScreenColors => "sd",
            Parameter::ViewportSize => "vp",
            Parameter::DocumentUrl => "dl",
            Parameter::DocumentHost => "dh",
            Parameter::DocumentPath => "dp",
            Parameter::DocumentTitle => "dt",
            Parameter::DocumentReferrer => "dr",
            Parameter::EventCategory => "ec",
            Parameter::EventAction => "ea",
            Parameter::EventLabel => "el",
            Parameter::EventValue => "ev",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::ProtocolVersion => "Protocol Version",
            Parameter::TrackingId => "Tracking ID",
            Parameter::AnonymizeIp => "Anonymize IP",
            Parameter::ClientId => "Client ID",
            Parameter::SessionControl => "Session Control",
            Parameter::HitType => "Hit Type",
            Parameter::AppName => "Application Name",
            Parameter::AppVersion => "Application Version",
            Parameter::UserLanguage => "User Language",
            Parameter::DocumentEncoding => "Document Encoding",
            Parameter::ScreenResolution => "Screen Resolution",
            Parameter::ScreenColors => "Screen Colors",
            Parameter::ViewportSize => "Viewport Size",
            Parameter::DocumentUrl => "Document Location URL",
            Parameter::DocumentHost => "Document Host Name",
            Parameter::DocumentPath => "Document Path",
            Parameter::DocumentTitle => "Document Title",
            Parameter::DocumentReferrer => "Document Referrer",
            Parameter::EventCategory => "Event Category",
            Parameter::EventAction => "Event Action",
            Parameter::EventLabel => "Event Label",
            Parameter::EventValue => "Event Value",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn wire_names_are_unique() {
        let mut seen = HashSet::new();
        for parameter in Parameter::ALL {
            assert!(
                seen.insert(parameter.wire_name()),
                "duplicate wire name {}",
                parameter.wire_name()
            );
        }
    }

    #[test]
    fn all_covers_every_variant() {
        assert_eq!(Parameter::ALL.len(), 22);
        let labels: HashSet<_> = Parameter::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels.len(), 22);
    }

    #[test]
    fn wire_names_match_protocol_codes() {
        assert_eq!(Parameter::TrackingId.wire_name(), "tid");
        assert_eq!(Parameter::UserLanguage.wire_name(), "ul");
        assert_eq!(Parameter::ScreenResolution.wire_name(), "sr");
        assert_eq!(Parameter::HitType.wire_name(), "t");
    }
}
