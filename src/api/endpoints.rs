pub fn generate_endpoint() -> &'static str {
    "/email/generate"
}

pub fn send_endpoint() -> &'static str {
    "/email/send"
}

pub fn validate_endpoint() -> &'static str {
    "/email/validate"
}

pub fn status_endpoint() -> &'static str {
    "/email/status"
}

pub fn test_connection_endpoint() -> &'static str {
    "/email/test-connection"
}

pub fn health_endpoint() -> &'static str {
    "/health"
}
