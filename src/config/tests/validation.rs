//! Tests for tuning value validation.

use rstest::rstest;

use crate::ThreadlinkConfig;
use crate::github::error::FetchError;

#[rstest]
fn defaults_are_valid() {
    let config = ThreadlinkConfig::default();

    assert!(config.validate().is_ok(), "defaults should validate");
}

#[rstest]
#[case::zero_concurrency(ThreadlinkConfig { max_concurrency: 0, ..Default::default() }, "max_concurrency")]
#[case::zero_request_timeout(
    ThreadlinkConfig { request_timeout_seconds: 0, ..Default::default() },
    "request_timeout_seconds"
)]
#[case::zero_aggregation_timeout(
    ThreadlinkConfig { aggregation_timeout_seconds: 0, ..Default::default() },
    "aggregation_timeout_seconds"
)]
fn rejects_zero_tuning_values(#[case] config: ThreadlinkConfig, #[case] field: &str) {
    let result = config.validate();

    match result {
        Err(FetchError::Configuration { message }) => assert!(
            message.contains(field),
            "message should name {field}: {message}"
        ),
        other => panic!("expected Configuration error, got {other:?}"),
    }
}
