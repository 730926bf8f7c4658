//! virtmem - entry point.
//!
//! Usage: virtmem <npages> <nframes> <rand|fifo|2fifo|custom> <sort|scan|focus>
//!
//! Runs the chosen workload over a simulated demand-paged address space and
//! prints the paging counters.

use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

use virtmem::storage::VirtualDisk;
use virtmem::vm::{PolicyKind, Vm};
use virtmem::workload::WorkloadKind;

/// File backing the simulated disk, created in the working directory.
const DISK_FILE: &str = "myvirtualdisk";

struct Config {
    npages: usize,
    nframes: usize,
    policy: PolicyKind,
    workload: WorkloadKind,
}

fn usage() -> ! {
    eprintln!("use: virtmem <npages> <nframes> <rand|fifo|2fifo|custom> <sort|scan|focus>");
    process::exit(1);
}

fn parse_args() -> Config {
    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        usage();
    }

    let npages: usize = match args[1].parse() {
        Ok(n) if n > 0 => n,
        _ => usage(),
    };
    let nframes: usize = match args[2].parse() {
        Ok(n) if n > 0 => n,
        _ => usage(),
    };
    let Ok(policy) = args[3].parse() else {
        usage();
    };
    let Ok(workload) = args[4].parse() else {
        usage();
    };

    Config {
        npages,
        nframes,
        policy,
        workload,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = parse_args();

    let disk = match VirtualDisk::open(DISK_FILE, config.npages as u32) {
        Ok(disk) => disk,
        Err(e) => {
            eprintln!("couldn't create virtual disk: {e}");
            process::exit(1);
        }
    };

    let mut vm = match Vm::new(config.npages, config.nframes, config.policy, disk) {
        Ok(vm) => vm,
        Err(e) => {
            eprintln!("couldn't create page table: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = config.workload.run(&mut vm) {
        eprintln!("workload {} failed: {e}", config.workload);
        process::exit(1);
    }

    println!("\n{}", vm.stats());
}
