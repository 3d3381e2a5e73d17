fn main() {
    if let Err(e) = glow_chat::cli::main() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
