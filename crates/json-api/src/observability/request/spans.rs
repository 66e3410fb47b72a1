//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    /// Path with identifier segments replaced, bounded in cardinality.
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_uuid_segment_is_templated() {
        let names = request_span_name("PUT", "/listings/0190a2b3-c4d5-7e6f-8a9b-0c1d2e3f4a5b");

        assert_eq!(names.route, "/listings/{uuid}");
        assert_eq!(names.otel_span_name, "PUT /listings/{uuid}");
    }

    #[test]
    fn root_and_collection_paths_are_kept() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/listings"), "/listings");
        assert_eq!(route_template("/listings/"), "/listings");
    }
}
