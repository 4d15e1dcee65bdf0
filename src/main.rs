fn main() {
    if let Err(e) = origin_filter::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
