pub mod gamma;
pub mod price;
pub mod tick_math;
