pub mod record;
pub mod reflect;
