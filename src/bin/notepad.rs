#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{env, io, process::ExitCode};

fn main() -> ExitCode {
    let mut stderr = io::stderr().lock();
    let status = cli::run(env::args_os(), notepad::sink::stdout(), &mut stderr);
    cli::exit_code_from(status)
}
