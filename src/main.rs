use KiRates::Examples::kinetics_examples::kin_examples;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub fn main() {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not initialised: {}", e);
    }
    //
    let task: usize = 3;
    kin_examples(task);
}
