//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The default API base URL, used by the demo binary when no override is provided.
/// Feel free to override it when initing this library.
pub static API_BASE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://site--outilbackend--fp64tcf5fhqm.code.run/".to_string())));

/// The User-Agent header sent with every request.
/// Feel free to override it when initing this library.
pub static USER_AGENT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("corkboard".to_string())));
