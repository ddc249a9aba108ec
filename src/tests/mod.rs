mod resources;

use crate::ReportConfig;
use crate::core::infrastructure::host_probe::MockLoadSampler;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub(crate) const TEST_MEMINFO: &str = "\
MemTotal:       32768000 kB
MemFree:        16384000 kB
Buffers:          102400 kB
Cached:          4096000 kB
";

pub(crate) const TEST_LOAD: &str =
    "%Cpu(s):  2.0 us,  1.0 sy,  0.0 ni, 97.0 id,  0.0 wa,  0.0 hi,  0.0 si,  0.0 st";

/// A fake host: empty guest directories plus `/proc`-style status files.
pub(crate) struct TestHost {
    pub dir: TempDir,
    pub config: ReportConfig,
}

impl TestHost {
    pub fn new(cores: usize) -> Self {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig {
            vm_config_dir: dir.path().join("qemu-server"),
            container_config_dir: dir.path().join("lxc"),
            uptime_path: dir.path().join("uptime"),
            meminfo_path: dir.path().join("meminfo"),
            cpuinfo_path: dir.path().join("cpuinfo"),
            ..Default::default()
        };

        fs::create_dir(&config.vm_config_dir).unwrap();
        fs::create_dir(&config.container_config_dir).unwrap();
        fs::write(&config.uptime_path, "185220.17 2950000.00\n").unwrap();
        fs::write(&config.meminfo_path, TEST_MEMINFO).unwrap();
        fs::write(&config.cpuinfo_path, cpuinfo(cores)).unwrap();

        Self { dir, config }
    }

    pub fn add_vm(&self, file_name: &str, contents: &str) {
        write_config(&self.config.vm_config_dir, file_name, contents);
    }

    pub fn add_container(&self, file_name: &str, contents: &str) {
        write_config(&self.config.container_config_dir, file_name, contents);
    }
}

pub(crate) fn write_config(dir: &Path, file_name: &str, contents: &str) {
    fs::write(dir.join(file_name), contents).unwrap();
}

pub(crate) fn cpuinfo(cores: usize) -> String {
    (0..cores)
        .map(|n| {
            format!(
                "processor\t: {}\nmodel name\t: AMD Ryzen 9 5950X 16-Core Processor\n\n",
                n
            )
        })
        .collect()
}

pub(crate) fn fixed_load() -> MockLoadSampler {
    let mut sampler = MockLoadSampler::new();
    sampler
        .expect_sample()
        .returning(|| Ok(TEST_LOAD.to_string()));
    sampler
}
