fn main() {
    if let Err(e) = qrawl_text::cli::run() {
        eprintln!("qrawl-text error: {e:#}");
        std::process::exit(1);
    }
}
