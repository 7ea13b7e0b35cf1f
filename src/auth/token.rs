//
//  teamcity-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Access Token Helpers
//!
//! TeamCity access tokens are created under *My Settings & Tools > Access
//! Tokens* and sent as bearer tokens. This module covers the small amount of
//! token handling the command-line tool needs: reading a token from standard
//! input, sanity-checking its shape and masking it for display.
//!
//! ## Example
//!
//! ```rust,no_run
//! use teamcity_cli::auth::{read_token_from_stdin, validate_token};
//!
//! fn token_from_pipe() -> anyhow::Result<String> {
//!     let token = read_token_from_stdin()?;
//!     if !validate_token(&token) {
//!         anyhow::bail!("Invalid token format");
//!     }
//!     Ok(token)
//! }
//! ```

use anyhow::Result;

/// Reads a single line from standard input and trims it.
///
/// Intended for `echo $TOKEN | tc ... --with-token` style usage.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Basic shape check: non-empty and free of whitespace.
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Masks all but the last four characters of a token.
///
/// ```rust
/// use teamcity_cli::auth::mask_token;
///
/// assert_eq!(mask_token("abcdefgh1234"), "********1234");
/// assert_eq!(mask_token("abc"), "***");
/// ```
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_token() {
        assert!(validate_token("eyJ0eXAiOiAiVENWMiJ9"));
        assert!(!validate_token(""));
        assert!(!validate_token("has space"));
        assert!(!validate_token("tab\there"));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("1234"), "****");
        assert_eq!(mask_token("secret-token"), "********oken");
        assert_eq!(mask_token(""), "");
    }
}
