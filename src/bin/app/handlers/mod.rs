pub mod health;
pub mod highlight;
