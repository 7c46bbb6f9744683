pub mod health;
pub mod meals;
