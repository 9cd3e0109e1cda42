pub mod record;
pub mod spend;
