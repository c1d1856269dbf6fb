pub mod guardarian;
pub mod moonpay;
pub mod paybis;
pub mod transak;
pub mod util;

pub(crate) const USER_AGENT: &str = "ramprate/0.2";
