use std::process;

fn main() {
    if let Err(err) = pakt_cli::run_cli() {
        pakt_logger::error(&err.to_string());
        for cause in err.chain().skip(1) {
            pakt_logger::error(&format!("caused by: {cause}"));
        }
        if pakt_logger::is_verbose() {
            eprintln!("{err:?}");
        }
        process::exit(1);
    }
}
