pub mod catalog;
pub mod health;
pub mod rankings;
pub mod sales;
