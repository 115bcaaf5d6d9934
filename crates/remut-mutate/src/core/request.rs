use crate::data::{Headers, Invocation, Payload, RequestDescriptor, RequestOptions};

/// Assemble a transport-ready request.
///
/// `url` is the resolved mutation URL (see [`crate::core::resolve_url`]).
/// Options are layered lowest to highest: `ambient`, `call_site`,
/// `overrides`. Headers start from a `content-type` implied by the payload
/// and are then overlaid key by key by each layer.
pub fn build_request(
    url: &str,
    invocation: &Invocation,
    ambient: &RequestOptions,
    call_site: &RequestOptions,
    overrides: Option<&RequestOptions>,
) -> RequestDescriptor {
    let mut options = ambient.layer(call_site);
    if let Some(overrides) = overrides {
        options = options.layer(overrides);
    }

    let payload = invocation.payload();
    let mut headers = Headers::new();
    headers.insert("content-type", Payload::content_type(payload));
    headers.overlay(&options.headers);

    let (url, body) = match invocation {
        Invocation::Delete { id } => (delete_url(url, id.as_ref()), None),
        Invocation::Write { body, .. } => (url.to_string(), body.as_ref().map(Payload::to_body)),
    };

    RequestDescriptor {
        method: invocation.verb(),
        url,
        headers,
        body,
        timeout: options.timeout,
        credentials: options.credentials,
    }
}

/// An absent, empty or `null` identifier leaves the URL untouched.
fn delete_url(url: &str, id: Option<&Payload>) -> String {
    match id {
        None | Some(Payload::Json(serde_json::Value::Null)) => url.to_string(),
        Some(id) => match id.to_segment() {
            segment if segment.is_empty() => url.to_string(),
            segment => format!("{url}/{segment}"),
        },
    }
}
