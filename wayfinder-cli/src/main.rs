//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    if let Err(err) = wayfinder_cli::init_logger() {
        eprintln!("wayfinder: failed to initialise logging: {err}");
    }
    if let Err(err) = wayfinder_cli::run() {
        eprintln!("wayfinder: {err}");
        std::process::exit(1);
    }
}
