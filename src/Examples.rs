/// runnable demonstrations of the rate engine, selected by task number
pub mod kinetics_examples;
