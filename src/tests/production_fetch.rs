#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    use crate::config::sources::{ProductionSourceConfig, SuccessCheck};
    use crate::sources::build_client;
    use crate::sources::production::ProductionFetcher;
    use crate::tests::common::{json, ADDRESS, PRODUCTION_PATH};

    fn contract(server: &MockServer) -> ProductionSourceConfig {
        ProductionSourceConfig {
            url: server.url("/v1/elh/address/{address}/currentpower"),
            ..ProductionSourceConfig::default()
        }
    }

    #[tokio::test]
    async fn sends_session_token_and_window() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(PRODUCTION_PATH)
                    .header("authorization", "SP-CUSTOM tok-abc")
                    .header("referer", "https://monitor.us.sunpower.com/")
                    .query_param_exists("starttime")
                    .query_param_exists("endtime");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({ "data": { "production": 3.125 } }));
            })
            .await;

        let fetcher = ProductionFetcher::new(build_client(5).unwrap(), contract(&server));
        let production = fetcher.fetch(ADDRESS, 300, "tok-abc").await.unwrap();

        mock.assert_async().await;
        assert_eq!(production, 3.125);
    }

    #[tokio::test]
    async fn window_reaches_offset_back_and_two_minutes_ahead() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(PRODUCTION_PATH)
                    .query_param("starttime", "2024-05-01T09:45:00")
                    .query_param("endtime", "2024-05-01T10:02:00");
                then.status(200).json_body(json!({ "data": { "production": 2.0 } }));
            })
            .await;

        let now = NaiveDateTime::parse_from_str("2024-05-01T10:00:59", "%Y-%m-%dT%H:%M:%S").unwrap();
        let fetcher = ProductionFetcher::new(build_client(5).unwrap(), contract(&server));
        let production = fetcher.fetch_at(ADDRESS, 900, "tok", now).await.unwrap();

        mock.assert_async().await;
        assert_eq!(production, 2.0);
    }

    #[tokio::test]
    async fn huge_offset_fails_without_request() {
        let fetcher = ProductionFetcher::new(
            build_client(5).unwrap(),
            ProductionSourceConfig {
                url: "http://127.0.0.1:9/v1/elh/address/{address}/currentpower".into(),
                ..ProductionSourceConfig::default()
            },
        );

        let err = fetcher.fetch(ADDRESS, 10_000_000_000_000, "tok").await.unwrap_err();

        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("out of range"), "{}", err);
    }

    #[tokio::test]
    async fn error_status_is_fetch_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PRODUCTION_PATH);
                then.status(401).body("token expired");
            })
            .await;

        let fetcher = ProductionFetcher::new(build_client(5).unwrap(), contract(&server));
        let err = fetcher.fetch(ADDRESS, 300, "stale").await.unwrap_err();

        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("token expired"), "{}", err);
    }

    #[tokio::test]
    async fn missing_production_field_is_fetch_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PRODUCTION_PATH);
                then.status(200).json_body(json!({ "data": { "consumption": 1.0 } }));
            })
            .await;

        let fetcher = ProductionFetcher::new(build_client(5).unwrap(), contract(&server));

        assert!(fetcher.fetch(ADDRESS, 300, "tok").await.unwrap_err().is_fetch_failure());
    }

    #[tokio::test]
    async fn unsuccessful_indicator_is_fetch_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PRODUCTION_PATH);
                then.status(200).json_body(json!({
                    "StatusCode": "500",
                    "ResponseMessage": "Unknown",
                    "data": { "production": 0 }
                }));
            })
            .await;

        let contract = ProductionSourceConfig {
            success: Some(SuccessCheck { pointer: "/StatusCode".into(), expected: json!("200") }),
            ..contract(&server)
        };
        let fetcher = ProductionFetcher::new(build_client(5).unwrap(), contract);

        assert!(fetcher.fetch(ADDRESS, 300, "tok").await.unwrap_err().is_fetch_failure());
    }
}
