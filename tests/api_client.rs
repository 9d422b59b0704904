mod endpoints {
    pub use mailgen::api::endpoints::*;
}

mod error {
    pub use mailgen::error::*;
}

mod gateway {
    pub use mailgen::api::gateway::*;
}

mod models {
    pub use mailgen::api::models::*;
}

mod client_under_test {
    #![allow(dead_code)]

    include!("../src/api/client.rs");

    #[test]
    fn builds_urls_under_the_base_path() {
        let client = BackendClient::new("http://localhost:5000", DEFAULT_TIMEOUT)
            .expect("client should build");
        let url = client
            .endpoint_url(endpoints::send_endpoint())
            .expect("url should build");
        assert_eq!(url.as_str(), "http://localhost:5000/email/send");

        let client = BackendClient::new("https://mail.example.com/api/", DEFAULT_TIMEOUT)
            .expect("client should build");
        let url = client
            .endpoint_url(endpoints::health_endpoint())
            .expect("url should build");
        assert_eq!(url.as_str(), "https://mail.example.com/api/health");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(BackendClient::new("not a url", DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn generation_envelope_drops_metadata() {
        let envelope: DataEnvelope<GeneratedEmail> = serde_json::from_str(
            r#"{"success":true,"data":{"subject":"S","body":"B","tokensUsed":42,"model":"gpt"}}"#,
        )
        .expect("envelope should parse");

        assert_eq!(
            envelope.data,
            GeneratedEmail {
                subject: "S".to_string(),
                body: "B".to_string(),
            }
        );
    }

    #[test]
    fn send_envelope_accepts_alias_keys() {
        let envelope: DataEnvelope<SendResult> = serde_json::from_str(
            r#"{"data":{"totalRecipients":3,"successful":2,"failures":[{"email":"x@y.com","error":"bounced"}]}}"#,
        )
        .expect("envelope should parse");

        assert_eq!(envelope.data.total_recipients, 3);
        assert_eq!(envelope.data.failures[0].address, "x@y.com");
        assert_eq!(envelope.data.failures[0].reason, "bounced");
    }

    #[test]
    fn send_envelope_defaults_missing_failures() {
        let envelope: DataEnvelope<SendResult> =
            serde_json::from_str(r#"{"data":{"totalRecipients":2,"successful":2}}"#)
                .expect("envelope should parse");
        assert!(envelope.data.failures.is_empty());
        assert!(envelope.data.is_consistent());
    }

    #[test]
    fn status_envelope_parses_optional_fields() {
        let envelope: DataEnvelope<ServiceStatus> = serde_json::from_str(
            r#"{"data":{"emailService":{"configured":true,"host":"smtp.example.com","user":"bot"},"aiService":{"configured":false},"server":{"environment":"development"}}}"#,
        )
        .expect("envelope should parse");

        let status = envelope.data;
        assert_eq!(status.email_service.host.as_deref(), Some("smtp.example.com"));
        assert!(status.ai_service.provider.is_none());
        assert!(!status.is_ready());
    }

    #[test]
    fn api_errors_normalize_with_operation_context() {
        let error = map_api_error(StatusCode::TOO_MANY_REQUESTS, r#"{"message":"rate limited"}"#)
            .into_service("failed to generate email");
        assert_eq!(error.to_string(), "failed to generate email: rate limited");
    }
}
