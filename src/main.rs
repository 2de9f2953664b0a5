use IsoThe::Examples::isotope_examples::isotope_examples;
use IsoThe::Utils::logger::init_logging;
use log::LevelFilter;

pub fn main() {
    if let Err(e) = init_logging(LevelFilter::Info, None) {
        eprintln!("{}", e);
    }
    let task: usize = 2;
    isotope_examples(task);
}
