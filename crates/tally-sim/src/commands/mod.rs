pub mod count;
pub mod pyramid;
pub mod trees;
pub mod verify;
