pub mod compare;
pub mod offers;
pub mod refresh;
pub mod ui;
