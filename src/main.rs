fn main() {
    if let Err(err) = schema_bridge::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
