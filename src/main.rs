use std::{env, process};
use boolean_proof_checker::client;

fn main() {
    pretty_env_logger::init();

    let paths = env::args().skip(1).collect::<Vec<_>>();
    if paths.is_empty() {
        eprintln!("usage: boolean-proof-checker PROOF.toml...");
        process::exit(2);
    }
    match client::start(paths.as_slice()) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(why) => {
            eprintln!("{}", why);
            process::exit(2);
        }
    }
}
