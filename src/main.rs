// chainbreak - brute-force solver for multi-stage classical-cipher pipelines.
//
// Exit codes:
// * 0 - run completed (zero hits is still a completed run)
// * 1 - usage error (invalid pipeline, missing dictionary, bad flag value)

mod allocator;

use std::process;

use chainbreak::cli::Cli;

fn main() {
    if let Err(e) = Cli::init().and_then(Cli::execute) {
        eprintln!("Error: {e:?}");
        process::exit(1);
    }
}
