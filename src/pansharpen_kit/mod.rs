pub mod align;
pub mod brovey;
pub mod mean_subtraction;
pub mod simple_mean;
pub mod stack;
