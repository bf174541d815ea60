pub mod database;
#[cfg(test)]
pub mod testing;
