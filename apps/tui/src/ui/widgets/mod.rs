pub mod forecast;
pub mod legend;
pub mod map;
pub mod popup;
