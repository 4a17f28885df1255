pub mod images;
pub mod questions;
pub mod responses;
