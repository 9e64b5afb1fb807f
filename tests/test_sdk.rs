//! SDK-level behaviour: builder, caching across calls, offline mode, async wrapper.

mod common;

use common::{assert_close, malaysian, singaporean, CountingProvider};
use dsr_sdk::config::{CalculatorConfig, DEFAULT_FOREIGN_EXCHANGE_RATE};
use dsr_sdk::mortgage::max_loan;
use dsr_sdk::{Commitments, DsrSdk, DsrStatus, Jurisdiction, RateSource};
use std::time::Duration;

fn sdk_with(provider: CountingProvider, dir: &std::path::Path) -> DsrSdk {
    DsrSdk::builder()
        .cache_dir(dir)
        .rate_provider(provider)
        .build()
        .unwrap()
}

#[test]
fn calculates_local_scenario() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = sdk_with(CountingProvider::failing(), tmp.path());

    let result = sdk.calculate(&malaysian(5_000.0, 500.0), &Commitments::new(800.0, 1_200.0));
    assert_close(result.net_income, 4_785.0);
    assert_close(result.dsr_percentage, 41.8);
    assert_eq!(result.status, DsrStatus::Healthy);
}

#[test]
fn foreign_rate_is_fetched_once_and_reused() {
    let tmp = tempfile::tempdir().unwrap();
    let provider = CountingProvider::returning(3.42);
    let sdk = sdk_with(provider.clone(), tmp.path());

    let income = singaporean(6_000.0, 0.0);
    let commitments = Commitments::new(1_000.0, 2_000.0);
    let first = sdk.calculate(&income, &commitments);
    let second = sdk.calculate(&income, &commitments);

    assert_eq!(first, second);
    assert_eq!(first.breakdown.exchange_rate_used, Some(3.42));
    assert_eq!(provider.calls(), 1);
}

#[test]
fn refresh_discards_cached_rates() {
    let tmp = tempfile::tempdir().unwrap();
    let provider = CountingProvider::returning(3.42);
    let sdk = sdk_with(provider.clone(), tmp.path());

    sdk.exchange_rate(Jurisdiction::Singapore).unwrap();
    sdk.refresh().unwrap();
    sdk.exchange_rate(Jurisdiction::Singapore).unwrap();
    assert_eq!(provider.calls(), 2);
}

#[test]
fn failing_source_falls_back_to_default_rate() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = sdk_with(CountingProvider::failing(), tmp.path());

    let result = sdk.calculate(&singaporean(5_000.0, 0.0), &Commitments::new(0.0, 1_500.0));
    assert_eq!(
        result.breakdown.exchange_rate_used,
        Some(DEFAULT_FOREIGN_EXCHANGE_RATE)
    );
    assert_eq!(result.breakdown.rate_source, Some(RateSource::Fallback));
    assert!(result.net_income > 0.0);
}

#[test]
fn unreachable_http_endpoint_falls_back() {
    let sdk = DsrSdk::builder()
        .in_memory_cache()
        .rate_api_url("http://127.0.0.1:9/v6/latest")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let applied = sdk.exchange_rate(Jurisdiction::Singapore).unwrap();
    assert_eq!(applied.rate, DEFAULT_FOREIGN_EXCHANGE_RATE);
    assert!(applied.is_fallback());
}

#[test]
fn local_jurisdiction_has_no_exchange_rate() {
    let sdk = DsrSdk::builder()
        .in_memory_cache()
        .rate_provider(CountingProvider::returning(3.42))
        .build()
        .unwrap();
    assert!(sdk.exchange_rate(Jurisdiction::Malaysia).is_none());
}

#[test]
fn offline_sdk_reuses_rates_persisted_by_an_earlier_session() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let online = sdk_with(CountingProvider::returning(3.42), tmp.path());
        online.exchange_rate(Jurisdiction::Singapore).unwrap();
    }

    let source = CountingProvider::returning(9.99);
    let offline = DsrSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .rate_provider(source.clone())
        .build()
        .unwrap();

    let applied = offline.exchange_rate(Jurisdiction::Singapore).unwrap();
    assert_eq!(applied.rate, 3.42);
    assert_eq!(applied.source, RateSource::Live);
    assert_eq!(source.calls(), 0);
}

#[test]
fn offline_sdk_without_cache_uses_fallback() {
    let tmp = tempfile::tempdir().unwrap();
    let source = CountingProvider::returning(3.42);
    let sdk = DsrSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .rate_provider(source.clone())
        .build()
        .unwrap();

    let applied = sdk.exchange_rate(Jurisdiction::Singapore).unwrap();
    assert!(applied.is_fallback());
    assert_eq!(source.calls(), 0);
}

#[test]
fn max_loan_uses_configured_mortgage_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = sdk_with(CountingProvider::failing(), tmp.path());

    let result = sdk.calculate(&malaysian(5_000.0, 500.0), &Commitments::new(800.0, 1_200.0));
    assert_eq!(
        sdk.max_loan(&result),
        max_loan(result.max_affordable_repayment, 35, 4.4)
    );
}

#[test]
fn custom_config_changes_classification() {
    let mut config = CalculatorConfig::default();
    config.thresholds.moderate = 30.0;
    config.thresholds.risky = 40.0;
    let sdk = DsrSdk::builder()
        .in_memory_cache()
        .config(config)
        .rate_provider(CountingProvider::failing())
        .build()
        .unwrap();

    let result = sdk.calculate(&malaysian(5_000.0, 500.0), &Commitments::new(800.0, 1_200.0));
    assert_eq!(result.status, DsrStatus::Risky);
}

#[test]
fn invalid_config_fails_build() {
    let mut config = CalculatorConfig::default();
    config.healthy_ratio_ceiling = 0.0;
    let result = DsrSdk::builder().in_memory_cache().config(config).build();
    assert!(result.is_err());
}

#[test]
fn sdk_is_shareable_across_threads() {
    let sdk = DsrSdk::builder()
        .in_memory_cache()
        .rate_provider(CountingProvider::returning(3.42))
        .build()
        .unwrap();
    let income = singaporean(6_000.0, 0.0);
    let commitments = Commitments::new(1_000.0, 2_000.0);
    let expected = sdk.calculate(&income, &commitments);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| sdk.calculate(&income, &commitments)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn display_summarises_configuration() {
    let sdk = DsrSdk::builder().in_memory_cache().build().unwrap();
    let shown = sdk.to_string();
    assert!(shown.starts_with("DsrSdk("));
    assert!(shown.contains("thresholds=60/70"));
}

// ---------------------------------------------------------------------------
// Async wrapper
// ---------------------------------------------------------------------------

#[cfg(feature = "async")]
mod async_sdk {
    use super::common::{assert_close, malaysian, singaporean, CountingProvider};
    use dsr_sdk::{AsyncDsrSdk, Commitments, DsrStatus, Jurisdiction};

    #[tokio::test]
    async fn calculates_on_blocking_pool() {
        let sdk = AsyncDsrSdk::builder()
            .in_memory_cache()
            .rate_provider(CountingProvider::failing())
            .build()
            .await
            .unwrap();

        let result = sdk
            .calculate(malaysian(5_000.0, 500.0), Commitments::new(800.0, 1_200.0))
            .await
            .unwrap();
        assert_close(result.dsr_percentage, 41.8);
        assert_eq!(result.status, DsrStatus::Healthy);
        sdk.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_calls_share_the_rate_cache() {
        let provider = CountingProvider::returning(3.42);
        let sdk = AsyncDsrSdk::builder()
            .in_memory_cache()
            .rate_provider(provider.clone())
            .build()
            .await
            .unwrap();

        let rate = sdk.exchange_rate(Jurisdiction::Singapore).await.unwrap();
        assert_eq!(rate.unwrap().rate, 3.42);

        let a = sdk.calculate(singaporean(6_000.0, 0.0), Commitments::new(0.0, 1_000.0));
        let b = sdk.calculate(singaporean(6_000.0, 0.0), Commitments::new(0.0, 1_000.0));
        let (a, b) = tokio::join!(a, b);
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(provider.calls(), 1);

        let max = sdk.run(|s| Ok(s.mortgage().max_loan(2_000.0))).await.unwrap();
        assert_eq!(max, 428_100.0);
        sdk.refresh().await.unwrap();
    }
}
