/**
 * Error Handling
 *
 * This module defines the API error taxonomy and its conversion to HTTP
 * responses. All handlers and services return `ApiError` so failures map
 * to a consistent JSON error body.
 */

pub mod conversion;
pub mod types;

pub use types::ApiError;
