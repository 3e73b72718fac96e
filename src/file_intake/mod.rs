pub mod interface;
pub mod intake;
pub mod media_type;
