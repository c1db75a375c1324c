//! Launch-time pre-fill from a query string

use crate::validation::Service;

/// Query parameter naming a service to pre-select
pub const SERVICE_PARAM: &str = "service";

/// Service named by the `service` parameter of `query`, if recognized.
///
/// Accepts `service=Web%20Dev` or `?service=Web+Dev&utm_source=x`.
/// Unknown services are ignored.
pub fn service_from_query(query: &str) -> Option<Service> {
    let query = query.trim().trim_start_matches('?');
    let value = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SERVICE_PARAM)
        .map(|(_, value)| value.into_owned())?;

    let service = Service::from_label(&value);
    if service.is_none() {
        tracing::debug!("Ignoring unrecognized service pre-fill {value:?}");
    }
    service
}
