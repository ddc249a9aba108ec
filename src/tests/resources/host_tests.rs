use crate::tests::{TEST_LOAD, TestHost, fixed_load};
use crate::{HostCapacityProbe, LOAD_PLACEHOLDER, ReportError};
use crate::core::infrastructure::host_probe::MockLoadSampler;

#[tokio::test]
async fn test_probe_reads_host_files() {
    let host = TestHost::new(6);
    let probe = HostCapacityProbe::new(&host.config, Box::new(fixed_load()));

    let capacity = probe.probe().await.unwrap();
    assert_eq!(capacity.cpu_core_count, 6);
    assert_eq!(capacity.cpu_model_name, "AMD Ryzen 9 5950X 16-Core Processor");
    assert_eq!(capacity.cpu_load_summary, TEST_LOAD);

    let uptime = capacity.uptime();
    assert_eq!((uptime.days, uptime.hours, uptime.minutes), (2, 3, 27));
}

#[tokio::test]
async fn test_probe_survives_missing_load_sampler() {
    let host = TestHost::new(2);
    let mut sampler = MockLoadSampler::new();
    sampler
        .expect_sample()
        .times(1)
        .returning(|| Err(ReportError::LoadSample("top: not found".to_string())));

    let capacity = HostCapacityProbe::new(&host.config, Box::new(sampler))
        .probe()
        .await
        .unwrap();
    assert_eq!(capacity.cpu_load_summary, LOAD_PLACEHOLDER);
}

#[tokio::test]
async fn test_probe_rejects_garbage_uptime() {
    let host = TestHost::new(2);
    std::fs::write(&host.config.uptime_path, "not-a-number\n").unwrap();

    let result = HostCapacityProbe::new(&host.config, Box::new(fixed_load()))
        .probe()
        .await;
    assert!(matches!(result, Err(ReportError::HostStatus { .. })));
}
