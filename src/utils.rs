use reqwest::blocking::Client;
use tracing::debug;

use crate::errors::GoogleAnalyticsError;
use crate::types::Response;

/// Posts one hit to the collector as a UTF-8 form body and captures the raw
/// reply. The caller decides what a failure means.
pub fn send_request(
    http: &Client,
    url: &str,
    params: &[(String, String)],
) -> Result<Response, GoogleAnalyticsError> {
    debug!(%url, fields = params.len(), "posting hit to collector");

    let res = http.post(url).form(&params).send()?;

    let status_code = res.status().as_u16();
    let body = res
        .text()
        .unwrap_or_else(|_| "<could not read body>".into());

    Ok(Response { status_code, body })
}
