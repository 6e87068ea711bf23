//! UI utilities for the terminal client.

use std::io::Write;

/// Prompt shown by the readline thread
pub fn prompt(user_name: &str) -> String {
    format!("{}> ", user_name)
}

/// Redisplay the prompt after printing asynchronous output
pub fn redisplay_prompt(user_name: &str) {
    print!("{}", prompt(user_name));
    std::io::stdout().flush().ok();
}
