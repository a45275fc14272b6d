fn main() {
    if let Err(error) = hubmirror::run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
