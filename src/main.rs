fn main() {
    if let Err(err) = pbt_formulation::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
