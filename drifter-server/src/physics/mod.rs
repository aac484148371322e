pub mod constants;
pub mod controller;
pub mod sim_body;

#[cfg(test)]
mod tests;
