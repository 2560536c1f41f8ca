#![forbid(unsafe_code)]

fn main() {
    std::process::exit(namerank_cli::run());
}
