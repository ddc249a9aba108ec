use crate::tests::{TestHost, fixed_load};
use crate::{GuestConfigParser, GuestKind, GuestRecord, ReportError, UsageReporter};

fn parser() -> GuestConfigParser {
    GuestConfigParser::new(GuestKind::VirtualMachine, ".conf")
}

fn sorted(mut records: Vec<GuestRecord>) -> Vec<GuestRecord> {
    records.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    records
}

#[tokio::test]
async fn test_vm_directory_totals_match_records() {
    let host = TestHost::new(8);
    host.add_vm(
        "100.conf",
        "name: web1\nmemory: 2048\ncores: 2\nscsi0: local-lvm:vm-100-disk-0,size=32G\n",
    );
    host.add_vm(
        "101.conf",
        "name: db1\nmemory: 8192\ncores: 4\n\
         virtio0: ceph-pool:vm-101-disk-0,cache=writeback,size=100G\n\
         virtio1: local-lvm:vm-101-disk-1,size=512M\n\
         efidisk0: local-lvm:vm-101-disk-2,efitype=4m,size=1M\n",
    );
    host.add_vm("102.conf", "name: idle\n");

    let inventory = parser()
        .parse_dir(&host.config.vm_config_dir)
        .await
        .unwrap();
    let records = sorted(inventory.records.clone());

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].disk_gb, 100);
    assert_eq!(
        records[1].locations_label(),
        "ceph-pool, local-lvm, local-lvm"
    );
    assert_eq!(records[2].memory_mb, 0);
    assert_eq!(records[2].cpu_count, 1);
    assert_eq!(records[2].locations_label(), "-");

    let memory: u64 = records.iter().map(|r| r.memory_mb).sum();
    let disk: u64 = records.iter().map(|r| r.disk_gb).sum();
    let cpu: u64 = records.iter().map(|r| u64::from(r.cpu_count)).sum();
    assert_eq!(inventory.totals.memory_mb, memory);
    assert_eq!(inventory.totals.disk_gb, disk);
    assert_eq!(inventory.totals.cpu, cpu);
    assert_eq!(inventory.totals.cpu, 7);
}

#[tokio::test]
async fn test_vm_sizes_in_megabytes_match_gigabytes() {
    let host = TestHost::new(8);
    host.add_vm("200.conf", "name: a\nscsi0: local:vm-200-disk-0,size=2048M\n");
    host.add_vm("201.conf", "name: b\nscsi0: local:vm-201-disk-0,size=2G\n");

    let records = sorted(
        parser()
            .parse_dir(&host.config.vm_config_dir)
            .await
            .unwrap()
            .records,
    );
    assert_eq!(records[0].disk_gb, records[1].disk_gb);
    assert_eq!(records[0].disk_gb, 2);
}

#[tokio::test]
async fn test_vm_directory_ignores_other_files() {
    let host = TestHost::new(8);
    host.add_vm("100.conf", "name: web1\ncores: 2\n");
    host.add_vm("100.conf.bak", "name: stale\ncores: 64\n");
    host.add_vm("notes.txt", "cores: 32\n");

    let inventory = parser()
        .parse_dir(&host.config.vm_config_dir)
        .await
        .unwrap();
    assert_eq!(inventory.records.len(), 1);
    assert_eq!(inventory.records[0].display_name, "web1");
    assert_eq!(inventory.totals.cpu, 2);
}

#[tokio::test]
async fn test_vm_malformed_fields_use_fallbacks() {
    let host = TestHost::new(8);
    host.add_vm("300.conf", "name: broken\nmemory: lots\ncores: -2\n");

    let inventory = parser()
        .parse_dir(&host.config.vm_config_dir)
        .await
        .unwrap();
    let record = &inventory.records[0];
    assert_eq!(record.memory_mb, 0);
    assert_eq!(record.cpu_count, 1);
}

#[tokio::test]
async fn test_vm_without_name_is_unnamed() {
    let host = TestHost::new(8);
    host.add_vm("400.conf", "memory: 1024\nnameserver: 1.1.1.1\n");

    let inventory = parser()
        .parse_dir(&host.config.vm_config_dir)
        .await
        .unwrap();
    assert_eq!(inventory.records[0].display_name, GuestRecord::UNNAMED);
}

#[tokio::test]
async fn test_vm_memory_at_u64_max_saturates() {
    let host = TestHost::new(8);
    host.add_vm("500.conf", "name: a\nmemory: 18446744073709551615\ncores: 2\n");
    host.add_vm("501.conf", "name: b\nmemory: 18446744073709551615\ncores: 2\n");
    host.add_container("502.conf", "hostname: c\nmemory: 512\n");

    let reporter = UsageReporter::builder()
        .config(host.config.clone())
        .load_sampler(fixed_load())
        .build();
    let report = reporter.collect().await.unwrap();

    assert_eq!(report.vms.totals.memory_mb, u64::MAX);
    assert_eq!(report.totals.memory_mb, u64::MAX);
    assert_eq!(report.totals.cpu, 5);
}

#[tokio::test]
async fn test_missing_vm_directory() {
    let host = TestHost::new(8);
    let missing = host.dir.path().join("does-not-exist");

    let result = parser().parse_dir(&missing).await;
    assert!(matches!(result, Err(ReportError::Io { .. })));
}
