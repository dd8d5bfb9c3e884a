pub mod ports;
pub mod services;
pub mod use_cases;

#[cfg(test)]
pub mod test_support;

// Re-export commonly used items
pub use use_cases::*;
