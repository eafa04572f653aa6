use std::collections::BTreeMap;

use crate::parameter::Parameter;

/// One trackable hit: a mapping from [`Parameter`] to value, plus arbitrary
/// custom fields keyed by their raw wire name. Empty values count as absent
/// and never reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    parameters: BTreeMap<Parameter, String>,
    custom: BTreeMap<String, String>,
}

macro_rules! parameter_accessors {
    ($($setter:ident / $getter:ident => $variant:ident),* $(,)?) => {
        $(
            pub fn $setter(mut self, value: impl Into<String>) -> Self {
                self.set(Parameter::$variant, value);
                self
            }

            pub fn $getter(&self) -> Option<&str> {
                self.get(Parameter::$variant)
            }
        )*
    };
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_app(
        tracking_id: impl Into<String>,
        app_name: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self::new()
            .tracking_id(tracking_id)
            .app_name(app_name)
            .app_version(app_version)
    }

    /// Sets `parameter` to `value`. A blank value removes the entry, so the
    /// field is omitted from the payload.
    pub fn set(&mut self, parameter: Parameter, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.parameters.remove(&parameter);
        } else {
            self.parameters.insert(parameter, value);
        }
    }

    pub fn get(&self, parameter: Parameter) -> Option<&str> {
        self.parameters.get(&parameter).map(String::as_str)
    }

    /// Fluent form of [`Request::set`].
    pub fn parameter(mut self, parameter: Parameter, value: impl Into<String>) -> Self {
        self.set(parameter, value);
        self
    }

    /// Sets a field the [`Parameter`] enumeration does not cover, keyed by
    /// its raw wire name. Blank values remove the entry.
    pub fn set_custom(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.custom.remove(&name);
        } else {
            self.custom.insert(name, value);
        }
    }

    pub fn get_custom(&self, name: &str) -> Option<&str> {
        self.custom.get(name).map(String::as_str)
    }

    pub fn custom(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_custom(name, value);
        self
    }

    /// Snapshot of the recognized parameters, safe for the caller to mutate.
    pub fn parameters(&self) -> BTreeMap<Parameter, String> {
        self.parameters.clone()
    }

    /// Snapshot of the custom parameters.
    pub fn custom_parameters(&self) -> BTreeMap<String, String> {
        self.custom.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.custom.is_empty()
    }

    /// Returns a copy of this request with every field it leaves unset
    /// filled from `defaults`. Neither input is mutated; explicit values on
    /// `self` always win.
    pub fn merged_with(&self, defaults: &Request) -> Request {
        let mut merged = self.clone();
        for (parameter, value) in &defaults.parameters {
            if merged.get(*parameter).is_none() {
                merged.set(*parameter, value.clone());
            }
        }
        for (name, value) in &defaults.custom {
            if merged.get_custom(name).is_none() {
                merged.set_custom(name.clone(), value.clone());
            }
        }
        merged
    }

    /// The wire form of this request: one `(key, value)` pair per non-empty
    /// field, keyed by the parameter's short code.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .map(|(parameter, value)| (parameter.wire_name().to_string(), value.clone()))
            .chain(self.custom.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect()
    }

    parameter_accessors! {
        protocol_version / get_protocol_version => ProtocolVersion,
        tracking_id / get_tracking_id => TrackingId,
        anonymize_ip / get_anonymize_ip => AnonymizeIp,
        client_id / get_client_id => ClientId,
        session_control / get_session_control => SessionControl,
        hit_type / get_hit_type => HitType,
        app_name / get_app_name => AppName,
        app_version / get_app_version => AppVersion,
        user_language / get_user_language => UserLanguage,
        document_encoding / get_document_encoding => DocumentEncoding,
        screen_resolution / get_screen_resolution => ScreenResolution,
        screen_colors / get_screen_colors => ScreenColors,
        viewport_size / get_viewport_size => ViewportSize,
        document_url / get_document_url => DocumentUrl,
        document_host / get_document_host => DocumentHost,
        document_path / get_document_path => DocumentPath,
        document_title / get_document_title => DocumentTitle,
        document_referrer / get_document_referrer => DocumentReferrer,
        event_category / get_event_category => EventCategory,
        event_action / get_event_action => EventAction,
        event_label / get_event_label => EventLabel,
        event_value / get_event_value => EventValue,
    }
}
