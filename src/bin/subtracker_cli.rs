use subtracker_core::{
    cli::{output, run},
    init,
};

fn main() {
    init();

    if let Err(err) = run(std::env::args().skip(1)) {
        output::error(err);
        std::process::exit(1);
    }
}
