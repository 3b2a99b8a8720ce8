//! repc CLI entry point

fn main() {
    repc::cli::run();
}
