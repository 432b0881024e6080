pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("Verbose: {}", msg);
    }
}

pub fn log_error(msg: &str) {
    eprintln!("Error: {}", msg);
}

pub fn log_warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}
