use crate::OutputTarget;
use clap::Parser;
use std::path::PathBuf;

/// Report memory, CPU and disk allocated to the guests of this Proxmox VE host.
#[derive(Debug, Parser)]
#[command(name = "pve-usage", version)]
pub struct Cli {
    /// Write the report to this file instead of standard output
    #[arg(short = 'o', long = "outfile", value_name = "FILE")]
    pub outfile: Option<PathBuf>,
}

impl Cli {
    pub fn target(&self) -> OutputTarget {
        OutputTarget::from(self.outfile.clone())
    }
}
