//! Biometric Login - face registration and photo login over a face API.
//!
//! This crate exposes:
//! - [`BiometricLogin`], which registers a user's face, authenticates users
//!   by photo and removes registered faces
//! - [`skybiometry`], the face API capability and its SkyBiometry client
//! - [`config`], environment-based configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use biometric_login::{BiometricLogin, LoginConfig};
//! use biometric_login_core::{Confidence, UserId, VendorOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let login = BiometricLogin::from_config(LoginConfig::from_env()?)?;
//!
//! let registration = login
//!     .register_face_for_user(
//!         &UserId::new("rafa"),
//!         "https://example.com/rafa.jpg",
//!         &VendorOptions::new(),
//!     )
//!     .await?;
//!
//! let result = login
//!     .authenticate_user_by_photo(
//!         &[UserId::new("rafa"), UserId::new("pedro")],
//!         &["https://example.com/login.jpg".to_owned()],
//!         Confidence::new(70),
//!         &VendorOptions::new(),
//!     )
//!     .await?;
//! assert_eq!(result.uid, UserId::new("rafa"));
//!
//! login.remove_face_for_user(&registration.tag_id).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod login;
pub mod skybiometry;

pub use config::{ConfigError, LoginConfig, LoginOptions, SkyBiometryConfig};
pub use login::{AuthenticationResult, BiometricLogin, LoginError, Registration};
