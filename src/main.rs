use log::warn;
use snafu::ErrorCompat;

mod etl;

/// The master list of officials, maintained by hand in a spreadsheet.
const INPUT_PATH: &str = "./officials/master-list.xlsx";
/// Where the frontend expects to find the converted data.
const OUTPUT_PATH: &str = "./officials.json";

fn main() {
    env_logger::init();

    if let Err(e) = etl::run_conversion(INPUT_PATH, OUTPUT_PATH) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
