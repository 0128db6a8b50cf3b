mod blacklist;
mod dividends;
pub mod utils;

fn main() {}
