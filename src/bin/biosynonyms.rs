use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    biosynonyms::cli::run(std::env::args().skip(1))
}
