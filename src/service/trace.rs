use axum::http::Request;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{MakeSpan, TraceLayer},
};
use tracing::{Span, info_span};

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>, HttpMakeSpan>;

pub fn http_trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http().make_span_with(HttpMakeSpan)
}

/// Request span carrying the session id when the path names one.
#[derive(Clone, Debug, Default)]
pub struct HttpMakeSpan;

impl<B> MakeSpan<B> for HttpMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let path = request.uri().path();
        info_span!(
            "http.request",
            method = %request.method(),
            uri = %request.uri(),
            session_id = session_id_from_path(path).unwrap_or("-"),
        )
    }
}

/// `/sessions/{id}/...` → `id`
fn session_id_from_path(path: &str) -> Option<&str> {
    let mut segments = path.trim_start_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some("sessions"), Some(id)) if !id.is_empty() && id != "health" => Some(id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_from_path() {
        assert_eq!(
            session_id_from_path("/sessions/abc/trail/entries"),
            Some("abc")
        );
        assert_eq!(session_id_from_path("/sessions/abc"), Some("abc"));
        assert_eq!(session_id_from_path("/sessions"), None);
        assert_eq!(session_id_from_path("/sessions/health"), None);
        assert_eq!(session_id_from_path("/other/abc"), None);
    }
}
