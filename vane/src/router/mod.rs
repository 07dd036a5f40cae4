pub mod quotes;
pub mod rates;
pub mod weather;

pub mod util;
