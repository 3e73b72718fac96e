#[cfg(test)]
pub mod impl_fake;
pub mod impl_temp_dir;
pub mod interface;
