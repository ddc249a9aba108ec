use crate::tests::TestHost;
use crate::{GuestConfigParser, GuestKind};

fn parser() -> GuestConfigParser {
    GuestConfigParser::new(GuestKind::Container, ".conf")
}

#[tokio::test]
async fn test_container_directory() {
    let host = TestHost::new(8);
    host.add_container(
        "101.conf",
        "hostname: ct1\nmemory: 512\ncores: 1\nswap: 512\n\
         rootfs: local-zfs:subvol-101-disk-0,size=8G\n",
    );
    host.add_container(
        "102.conf",
        "hostname: ct2\nmemory: 1024\ncores: 2\nswap: 0\n\
         rootfs: local-lvm:vm-102-disk-0,size=4096M\n\
         mp0: tank:subvol-102-disk-1,mp=/data,size=500G\n",
    );

    let inventory = parser()
        .parse_dir(&host.config.container_config_dir)
        .await
        .unwrap();
    let mut records = inventory.records.clone();
    records.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

    assert_eq!(records[0].swap_mb, Some(512));
    assert_eq!(records[1].swap_mb, Some(0));
    // mount points are not counted
    assert_eq!(records[1].disk_gb, 4);
    assert_eq!(records[1].locations_label(), "local-lvm");

    assert_eq!(inventory.totals.memory_mb, 1536);
    assert_eq!(inventory.totals.disk_gb, 12);
    assert_eq!(inventory.totals.cpu, 3);
}

#[tokio::test]
async fn test_container_defaults() {
    let host = TestHost::new(8);
    host.add_container("105.conf", "arch: amd64\nostype: debian\n");

    let inventory = parser()
        .parse_dir(&host.config.container_config_dir)
        .await
        .unwrap();
    let record = &inventory.records[0];

    assert_eq!(record.id.as_str(), "105");
    assert_eq!(record.display_name, "(no name)");
    assert_eq!(record.memory_mb, 0);
    assert_eq!(record.cpu_count, 1);
    assert_eq!(record.swap_mb, Some(0));
    assert_eq!(record.disk_gb, 0);
    assert!(record.disk_locations.is_empty());
}

#[tokio::test]
async fn test_empty_container_directory() {
    let host = TestHost::new(8);

    let inventory = parser()
        .parse_dir(&host.config.container_config_dir)
        .await
        .unwrap();
    assert!(inventory.records.is_empty());
    assert_eq!(inventory.totals.cpu, 0);
    assert_eq!(inventory.kind, GuestKind::Container);
}
